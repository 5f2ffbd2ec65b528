use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use cloudrip_common::progress::ProgressReporter;
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::terminal::colors;

const TICK: Duration = Duration::from_millis(100);
const TEMPLATE: &str = "{spinner:.blue} {msg} {bar:32.cyan/bright_black} {pos}/{len} ({eta})";

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }

    pub fn set_message(&self, msg: String) {
        self.spinner.set_message(msg);
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
        .progress_chars("━╸ ");
    pb.set_style(style);

    SpinnerHandle { spinner: pb }
}

/// Drives the shared progress bar from scan events.
pub struct ScanProgress {
    quiet: bool,
}

impl ScanProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressReporter for ScanProgress {
    fn start(&self, total: usize) {
        let handle = get_spinner();
        handle.spinner.set_length(total as u64);
        handle.spinner.set_position(0);
        handle.set_message(format!("{}", "Resolving".color(colors::TEXT_DEFAULT)));

        if !self.quiet {
            handle.spinner.set_draw_target(ProgressDrawTarget::stderr());
            handle.spinner.enable_steady_tick(TICK);
        }
    }

    fn increment(&self) {
        get_spinner().spinner.inc(1);
    }

    fn stop(&self) {
        get_spinner().finish_and_clear();
    }
}

/// Log sink that keeps output from tearing the progress bar.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match SPINNER.get() {
            Some(handle) => handle.spinner.suspend(|| io::stdout().write_all(buf))?,
            None => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
