pub mod config;
pub mod health;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use cloudrip_common::config::{OutputFormat, ScanConfig};
use cloudrip_common::error::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "cloudrip")]
#[command(version, about = "Finds origin servers hiding behind Cloudflare.")]
pub struct CommandLine {
    /// Target domain, e.g. example.com
    #[arg(
        short,
        long,
        required_unless_present_any = ["config", "create_config", "health", "metrics"]
    )]
    pub domain: Option<String>,

    /// Wordlist with one subdomain per line [default: dom.txt]
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Number of concurrent workers [default: 10]
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Retries per DNS lookup [default: 2]
    #[arg(long)]
    pub retries: Option<u32>,

    /// Base delay between retries, e.g. 500ms
    #[arg(long, value_parser = humantime::parse_duration)]
    pub backoff: Option<Duration>,

    /// Timeout for a single DNS attempt, e.g. 5s
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Pause before each job, e.g. 100ms
    #[arg(long, value_parser = humantime::parse_duration)]
    pub delay: Option<Duration>,

    /// Resolve the CNAME target when a name has no address
    #[arg(long)]
    pub follow_cname: bool,

    /// Also report addresses inside Cloudflare ranges
    #[arg(long)]
    pub include_cf: bool,

    /// Use the built-in Cloudflare ranges instead of fetching them
    #[arg(long)]
    pub no_fetch_cf: bool,

    /// Write results to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file format: text or json
    #[arg(long)]
    pub output_format: Option<OutputFormat>,

    /// Load settings from a YAML or JSON file; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write an example config file and exit
    #[arg(long, value_name = "PATH")]
    pub create_config: Option<PathBuf>,

    /// Print a health report as JSON
    #[arg(long)]
    pub health: bool,

    /// Print scan metrics as JSON
    #[arg(long)]
    pub metrics: bool,

    /// Less output, repeat for even less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether a scan should run. Health and metrics alone only report.
    pub fn wants_scan(&self) -> bool {
        self.domain.is_some() || self.config.is_some()
    }

    /// Effective scan settings: defaults, then `--config`, then flags.
    pub fn to_scan_config(&self) -> Result<ScanConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => ScanConfig::from_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(domain) = &self.domain {
            cfg.domain = domain.trim().to_string();
        }
        if let Some(wordlist) = &self.wordlist {
            cfg.wordlist = wordlist.clone();
        }
        if let Some(threads) = self.threads {
            cfg.threads = threads;
        }
        if let Some(retries) = self.retries {
            cfg.retries = retries;
        }
        if let Some(backoff) = self.backoff {
            cfg.backoff = backoff;
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout = timeout;
        }
        if let Some(delay) = self.delay {
            cfg.delay = delay;
        }
        if let Some(output) = &self.output {
            cfg.output = Some(output.clone());
        }
        if let Some(format) = self.output_format {
            cfg.output_format = format;
        }
        cfg.follow_cname |= self.follow_cname;
        cfg.include_cf |= self.include_cf;
        cfg.no_fetch_cf |= self.no_fetch_cf;

        cfg.validate()?;
        Ok(cfg)
    }
}
