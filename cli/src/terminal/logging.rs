use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner::SpinnerWriter;

pub const PRINT_TARGET: &str = "cloudrip::print";
pub const SUCCESS_TARGET: &str = "cloudrip::success";

pub struct CloudripFormatter;

impl<S, N> FormatEvent<S, N> for CloudripFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawMessage::default();
            event.record(&mut visitor);
            return writeln!(writer, "{}", visitor.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match *meta.level() {
                Level::TRACE => ("[ ]", |s| s.dimmed()),
                Level::DEBUG => ("[?]", |s| s.blue()),
                Level::INFO if meta.target() == SUCCESS_TARGET => ("[+]", |s| s.green().bold()),
                Level::INFO => ("[*]", |s| s.cyan().bold()),
                Level::WARN => ("[!]", |s| s.yellow().bold()),
                Level::ERROR => ("[-]", |s| s.red().bold()),
            };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Picks the `raw_msg` field out of a print event.
#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the quiet level.
pub fn init_logging(quiet: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(CloudripFormatter)
        .with_writer(|| SpinnerWriter)
        .init();
}

fn default_directives(quiet: u8) -> String {
    let base = if quiet == 0 { "info" } else { "warn" };
    let print = if quiet > 1 { "warn" } else { "info" };
    format!("{base},hickory_proto=warn,hickory_resolver=warn,{PRINT_TARGET}={print},{SUCCESS_TARGET}=info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_levels_narrow_the_filter() {
        assert!(default_directives(0).starts_with("info,"));
        assert!(default_directives(1).starts_with("warn,"));
        assert!(default_directives(1).contains("cloudrip::print=info"));
        assert!(default_directives(2).contains("cloudrip::print=warn"));
        assert!(default_directives(2).ends_with("cloudrip::success=info"));
    }
}
