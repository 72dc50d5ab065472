//! Configuration loading and validation for the gateway.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or
//! invalid, including a credential passphrase that is too short.

use anyhow::{Context, Result};
use integrity::Passphrase;
use serde::Deserialize;

/// Validated gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Passphrase from which the credential envelope key is derived.
    /// **Required**, at least 32 characters. Redacted in `Debug` output.
    pub credentials_passphrase: Passphrase,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Largest number of identifiers accepted by one batch verification call.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// OTLP endpoint for span export. Logs only when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_max_batch_size() -> usize {
    1000
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.credentials_passphrase
            .validate()
            .context("CREDENTIALS_PASSPHRASE is invalid")?;

        if self.max_batch_size == 0 {
            anyhow::bail!("MAX_BATCH_SIZE must be > 0");
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be empty when set");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            credentials_passphrase: Passphrase::new("x".repeat(40)),
            listen_port: default_listen_port(),
            max_batch_size: default_max_batch_size(),
            otel_exporter_otlp_endpoint: None,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_max_batch_size(), 1000);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_short_passphrase() {
        let cfg = Config {
            credentials_passphrase: Passphrase::new("too-short"),
            ..valid()
        };
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err:#}").contains("CREDENTIALS_PASSPHRASE"));
    }

    #[test]
    fn validate_rejects_empty_passphrase() {
        let cfg = Config {
            credentials_passphrase: Passphrase::new(""),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_batch_size() {
        let cfg = Config {
            max_batch_size: 0,
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_otlp_endpoint() {
        let cfg = Config {
            otel_exporter_otlp_endpoint: Some("  ".into()),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_never_prints_passphrase() {
        let cfg = valid();
        assert!(!format!("{cfg:?}").contains("xxxxxxxx"));
    }
}
