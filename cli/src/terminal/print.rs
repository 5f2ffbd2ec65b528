//! Report lines for the scan: banner, settings block, origin tree and rules.
//! Everything goes through the raw print target so it shares the progress bar's writer.

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;
use crate::terminal::logging::PRINT_TARGET;

pub const WIDTH: usize = 64;

pub fn line(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn blank() {
    line("");
}

pub fn rule() {
    line(&"═".repeat(WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn banner() {
    let label = format!(" cloudrip v{} ", env!("CARGO_PKG_VERSION"));
    let (left, right) = padding(label.width());
    line(&format!(
        "{}{}{}",
        "═".repeat(left).color(colors::SEPARATOR),
        label.bright_green().bold(),
        "═".repeat(right).color(colors::SEPARATOR)
    ));
}

/// Upper-cased title centred in a thin rule.
pub fn section(title: &str) {
    let label = format!("⟦ {} ⟧", title.to_uppercase());
    let (left, right) = padding(label.width());
    line(&format!(
        "{}{}{}",
        "─".repeat(left).color(colors::SEPARATOR),
        label.color(colors::PRIMARY).bold(),
        "─".repeat(right).color(colors::SEPARATOR)
    ));
}

/// Key/value rows with dot leaders up to the longest key.
pub fn settings(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    for (key, value) in rows {
        line(&format!(
            "  {}{} {}",
            key.color(colors::PRIMARY),
            leader(key, width).color(colors::SEPARATOR),
            value.color(colors::TEXT_DEFAULT)
        ));
    }
}

/// Yellow remark under the settings block.
pub fn note(msg: &str) {
    line(&format!("  {} {}", "!".color(colors::ACCENT), msg.yellow()));
}

/// A name followed by one branch per origin address.
pub fn origin(fqdn: &str, addresses: &[(String, ColoredString)]) {
    line(&format!(
        "{} {}",
        "●".color(colors::ACCENT),
        fqdn.color(colors::PRIMARY).bold()
    ));
    for (i, (kind, ip)) in addresses.iter().enumerate() {
        let branch = if i + 1 == addresses.len() { "└─" } else { "├─" };
        line(&format!(
            "  {} {} {}",
            branch.color(colors::SEPARATOR),
            format!("{kind:<4}").color(colors::TEXT_DEFAULT),
            ip
        ));
    }
}

pub fn centered(msg: &str) {
    let (left, _) = padding(console::measure_text_width(msg));
    line(&format!("{}{}", " ".repeat(left), msg));
}

fn leader(key: &str, width: usize) -> String {
    format!("{}:", ".".repeat(width.saturating_sub(key.width()) + 1))
}

fn padding(used: usize) -> (usize, usize) {
    let free = WIDTH.saturating_sub(used);
    (free / 2, free - free / 2)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
