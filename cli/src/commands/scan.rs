use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::output;
use crate::terminal::{colors, format, print};
use crate::terminal::spinner::ScanProgress;
use cloudrip_common::config::ScanConfig;
use cloudrip_common::network::record::ResultEntry;
use cloudrip_common::scan::ScanResult;
use cloudrip_common::success;
use cloudrip_core::ranges::CloudflareApi;
use cloudrip_core::resolver::SystemResolver;
use cloudrip_core::scanner::Scanner;
use cloudrip_core::wordlist::FileWordlist;

/// Scanner wired to the system resolver, the live range API and on-disk wordlists.
pub fn build_scanner(quiet: u8) -> Scanner {
    Scanner::new(
        Arc::new(SystemResolver::new()),
        Box::new(CloudflareApi::new()),
        Box::new(FileWordlist),
    )
    .with_progress(Arc::new(ScanProgress::new(quiet > 0)))
}

pub async fn scan(scanner: &Scanner, cfg: &ScanConfig, quiet: u8) -> anyhow::Result<()> {
    print_settings(cfg, quiet);

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping workers");
                cancel.cancel();
            }
        }
    });

    let outcome = scanner.scan(&cancel, cfg).await;
    ctrl_c.abort();
    let result = outcome.context("scan aborted")?;

    if let Some(path) = &cfg.output {
        output::save(&result.results, path, cfg.output_format)
            .with_context(|| format!("saving results to {}", path.display()))?;
        success!("Results saved to {}", path.display());
    }

    scan_ends(&result, cfg, quiet);
    Ok(())
}

fn print_settings(cfg: &ScanConfig, quiet: u8) {
    if quiet > 0 {
        return;
    }

    print::settings(&[
        ("Domain", cfg.domain.clone()),
        ("Wordlist", cfg.wordlist.display().to_string()),
        ("Threads", cfg.threads.to_string()),
        (
            "Retries",
            format!("{} (backoff {})", cfg.retries, humantime::format_duration(cfg.backoff)),
        ),
        ("Timeout", humantime::format_duration(cfg.timeout).to_string()),
        ("CNAME", if cfg.follow_cname { "follow" } else { "ignore" }.to_string()),
        ("Ranges", if cfg.no_fetch_cf { "built-in" } else { "live" }.to_string()),
    ]);
    if cfg.include_cf {
        print::note("Cloudflare addresses are included in the results");
    }
}

fn scan_ends(result: &ScanResult, cfg: &ScanConfig, quiet: u8) {
    if result.total_found == 0 {
        match quiet {
            0 => {
                print::section("no origins found");
                let msg = format!("nothing under {} resolved to an origin", cfg.domain);
                print::centered(&msg.red().to_string());
            }
            _ => warn!("No origins found for {}", cfg.domain),
        }
        return;
    }

    if quiet == 0 {
        print::section(&format!("origins of {}", cfg.domain));
        print_results(result);
    }
    print_summary(result, quiet);
}

fn print_results(result: &ScanResult) {
    let mut groups: BTreeMap<&str, Vec<&ResultEntry>> = BTreeMap::new();
    for entry in output::flatten_sorted(&result.results) {
        groups.entry(entry.fqdn.as_str()).or_default().push(entry);
    }

    for (idx, (fqdn, group)) in groups.iter().enumerate() {
        print::origin(fqdn, &format::entries_to_detail(group));
        if idx + 1 != groups.len() {
            print::blank();
        }
    }
}

fn print_summary(result: &ScanResult, quiet: u8) {
    let names: ColoredString = format!("{} names", result.total_found).bold().green();
    let addresses: ColoredString = format!("{} addresses", result.entry_count()).bold().green();
    let total_time: ColoredString = format_elapsed(result.duration).bold().yellow();
    let output: ColoredString =
        format!("Scan Complete: {addresses} on {names} in {total_time}").color(colors::TEXT_DEFAULT);

    match quiet {
        0 => {
            print::rule();
            print::centered(&output.to_string());
        }
        _ => success!("{}", output),
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
