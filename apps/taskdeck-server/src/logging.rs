//! Logging setup for the taskdeck server

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// Structured JSON output, one event per line
    Json,
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level defaults to `debug` when
/// `verbose` is set and `info` otherwise.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(verbose: bool, format: LogFormat) -> anyhow::Result<()> {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_default_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    fn test_log_format_value_enum_variants() {
        assert_eq!(
            LogFormat::from_str("json", true).unwrap(),
            LogFormat::Json
        );
        assert_eq!(
            LogFormat::from_str("text", true).unwrap(),
            LogFormat::Text
        );
        assert!(LogFormat::from_str("xml", true).is_err());
    }
}
