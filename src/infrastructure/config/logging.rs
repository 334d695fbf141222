//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Raise the level for `-v` flags (`info`, then `debug`, then `trace`).
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.level = match verbose {
            0 => self.level,
            1 => "info".into(),
            2 => "debug".into(),
            _ => "trace".into(),
        };
        self
    }

    /// Initialize the tracing subscriber. Logs go to stderr so command
    /// output on stdout stays parseable. `RUST_LOG` overrides the level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        // A subscriber may already be installed (tests).
        let _ = result;
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.clone().with_verbosity(0).level, "warn");
        assert_eq!(config.clone().with_verbosity(1).level, "info");
        assert_eq!(config.clone().with_verbosity(2).level, "debug");
        assert_eq!(config.with_verbosity(5).level, "trace");
    }
}
