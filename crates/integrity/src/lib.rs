//! Identifier integrity and secret protection primitives.
//!
//! Every item in this crate is a pure function or an immutable value: no I/O,
//! no async runtime, no shared mutable state. Callers may invoke any operation
//! from as many threads as they like without coordination.
//!
//! - [`checksum`]: learner identifier check symbols (Luhn mod 32).
//! - [`phone`]: canonical E.164 phone numbers for messaging destinations.
//! - [`crypto`]: authenticated encryption of provider credentials at rest.
//! - [`template`]: sanity checks for third-party message template identifiers.

pub mod alphabet;
pub mod checksum;
pub mod crypto;
pub mod phone;
pub mod template;

pub use checksum::{verify, ChecksumError, LearnerId};
pub use crypto::{mask, CipherError, Passphrase, SecretEnvelopeCipher};
pub use phone::{normalize, PhoneError};
pub use template::is_valid_template_id;
