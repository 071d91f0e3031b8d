//! Log output for the CLI.
//!
//! Events go to stderr so stdout stays reserved for command output such as
//! the module text printed by `roket split`.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::fmt::{self, MakeWriter, time::UtcTime};

use roket_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TelemetryError {
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs the process-wide subscriber on the first call.
///
/// Later calls succeed without replacing it, so the first configuration
/// loaded in a process decides its log filter and format.
pub(crate) fn initialise(config: &Config) -> Result<(), TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| {
            let subscriber = build_subscriber(config, io::stderr, io::stderr().is_terminal())?;
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(())
        })
        .map(|_| ())
}

/// Builds a subscriber writing `config`'s format to `writer`.
pub(crate) fn build_subscriber<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .parse(config.log_filter())
        .map_err(|source| TelemetryError::Filter {
            filter: config.log_filter().to_owned(),
            source,
        })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .with_timer(UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.with_ansi(ansi).compact().finish()),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex, PoisonError};

    use rstest::rstest;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
            String::from_utf8(bytes).unwrap_or_else(|err| panic!("log utf8: {err}"))
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(config: &Config) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = build_subscriber(config, move || writer.clone(), false)
            .unwrap_or_else(|err| panic!("subscriber: {err}"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "roket_cli::run", modules = 2, "scripts partitioned");
            tracing::debug!(target: "roket_cli::run", "hidden below info");
        });
        sink.text()
    }

    #[test]
    fn json_format_emits_flattened_objects() {
        let config = Config {
            log_format: LogFormat::Json,
            ..Config::default()
        };
        let output = capture(&config);
        let line = output.lines().next().unwrap_or_else(|| panic!("no log line"));
        assert!(line.starts_with('{'), "line: {line}");
        assert!(line.contains(r#""message":"scripts partitioned""#), "line: {line}");
        assert!(line.contains(r#""modules":2"#), "line: {line}");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn compact_format_is_plain_text() {
        let output = capture(&Config::default());
        assert!(!output.starts_with('{'), "output: {output}");
        assert!(output.contains("scripts partitioned"), "output: {output}");
        assert!(!output.contains("hidden below info"), "output: {output}");
    }

    #[rstest]
    #[case("roket_cli=debug", true)]
    #[case("warn", false)]
    fn filter_selects_events(#[case] filter: &str, #[case] shows_info: bool) {
        let config = Config {
            log_filter: filter.to_owned(),
            ..Config::default()
        };
        assert_eq!(capture(&config).contains("scripts partitioned"), shows_info);
    }

    #[test]
    fn malformed_filter_is_reported() {
        let config = Config {
            log_filter: "roket_cli=loud".to_owned(),
            ..Config::default()
        };
        let Err(err) = build_subscriber(&config, io::sink, false) else {
            panic!("filter should not parse");
        };
        assert!(err.to_string().contains("roket_cli=loud"), "error: {err}");
    }
}
