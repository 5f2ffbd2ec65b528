use anyhow::Context;
use cloudrip_core::scanner::Scanner;
use serde::Serialize;

/// Prints the requested reports as pretty JSON on stdout.
pub fn report(scanner: &Scanner, health: bool, metrics: bool) -> anyhow::Result<()> {
    if health {
        print_json(&scanner.health_check()).context("encoding health report")?;
    }
    if metrics {
        print_json(&scanner.metrics()).context("encoding metrics")?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
