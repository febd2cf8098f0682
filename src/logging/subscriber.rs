//! Tracing subscriber setup: stderr formatter and initialisation.
use std::fmt;

use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::{DRY_RUN_TARGET, LOG_ENV, PREFIX};

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl Visit for MessageExtractor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one log line (without the newline).
fn format_line(level: Level, target: &str, msg: &str) -> String {
    match level {
        Level::ERROR => format!("{PREFIX} error: {msg}"),
        Level::WARN => format!("{PREFIX} warning: {msg}"),
        Level::INFO if target == DRY_RUN_TARGET => format!("{PREFIX} [DRY RUN] {msg}"),
        Level::INFO => format!("{PREFIX} {msg}"),
        _ => format!("{PREFIX} debug: {msg}"),
    }
}

/// A [`FormatEvent`] that emits plain, prefixed lines.
///
/// Standard error is usually captured by the editor host, so no colour codes
/// are written.
struct AdapterFormatter;

impl<S, N> FormatEvent<S, N> for AdapterFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            format_line(*metadata.level(), metadata.target(), &extractor.message)
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Everything goes to standard error; standard output is reserved for the
/// response.  The default level is `info` (`debug` with `verbose`), and the
/// `NVIM_ADAPTER_LOG` variable overrides it with [`EnvFilter`] directives.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(AdapterFormatter)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_carry_prefix() {
        assert_eq!(
            format_line(Level::INFO, "nvim_adapter::resources", "apply: config /x"),
            "[nvim-adapter] apply: config /x"
        );
    }

    #[test]
    fn dry_run_target_is_tagged() {
        assert_eq!(
            format_line(Level::INFO, DRY_RUN_TARGET, "would apply: config /x"),
            "[nvim-adapter] [DRY RUN] would apply: config /x"
        );
    }

    #[test]
    fn severity_labels() {
        assert_eq!(format_line(Level::ERROR, "x", "boom"), "[nvim-adapter] error: boom");
        assert_eq!(format_line(Level::WARN, "x", "hmm"), "[nvim-adapter] warning: hmm");
        assert_eq!(format_line(Level::DEBUG, "x", "d"), "[nvim-adapter] debug: d");
        assert_eq!(format_line(Level::TRACE, "x", "t"), "[nvim-adapter] debug: t");
    }

    #[test]
    fn dry_run_target_only_tags_info() {
        assert_eq!(
            format_line(Level::WARN, DRY_RUN_TARGET, "w"),
            "[nvim-adapter] warning: w"
        );
    }
}
