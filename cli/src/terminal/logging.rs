use colored::*;
use ipprov_core::operator::COMMAND_TARGET;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::{print, progress};

pub struct IpprovFormatter;

impl<S, N> FormatEvent<S, N> for IpprovFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        // Decorative output, printed verbatim.
        if meta.target() == print::PRINT_TARGET {
            ctx.field_format().format_fields(writer.by_ref(), event)?;
            return writeln!(writer);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Filter directives for a quiet level. Issued commands stay visible at every
/// level.
fn default_directives(quiet: u8) -> String {
    match quiet {
        0 => "info".to_string(),
        1 => format!("warn,{COMMAND_TARGET}=info"),
        _ => format!("error,{COMMAND_TARGET}=info"),
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `--quiet`.
pub fn init_logging(quiet: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(IpprovFormatter)
        .with_writer(|| progress::ProgressWriter)
        .init();
}
