mod commands;
mod output;
mod terminal;

use commands::{CommandLine, config, health, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    if let Some(path) = &commands.create_config {
        return config::create_config(path);
    }

    let scanner = scan::build_scanner(commands.quiet);

    if commands.wants_scan() {
        let cfg = commands.to_scan_config()?;
        if commands.quiet == 0 {
            print::banner();
        }
        scan::scan(&scanner, &cfg, commands.quiet).await?;
        if commands.quiet == 0 {
            print::rule();
        }
    }

    health::report(&scanner, commands.health, commands.metrics)
}
