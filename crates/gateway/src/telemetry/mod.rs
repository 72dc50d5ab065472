//! Tracing setup: structured JSON logs, plus OTLP span export when configured.
//!
//! # Telemetry invariants
//!
//! - **No secret material** (passphrase, derived key, plaintext credential,
//!   envelope) and no learner identifier or phone number may appear in any
//!   span attribute or log field. Log reasons, lengths and counts instead.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
