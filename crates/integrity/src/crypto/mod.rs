//! AES-256-GCM envelope encryption for provider credentials at rest.
//!
//! This module is intentionally free of configuration, storage and HTTP
//! dependencies. Callers hand it a [`Passphrase`] once and get back a
//! [`SecretEnvelopeCipher`] they can share freely.
//!
//! # Envelope format
//!
//! ```text
//! base64( iv[12] || tag[16] || ciphertext[n] )
//! ```
//!
//! The key is `SHA-256(passphrase)`. There is no version byte and no key
//! identifier: a single passphrase is in force at any time.

pub mod cipher;
pub mod key;
pub mod mask;

pub use cipher::{decrypt, encrypt, CipherError, Envelope, SecretEnvelopeCipher, IV_LEN, TAG_LEN};
pub use key::{DerivedKey, Passphrase, KEY_LEN, MIN_PASSPHRASE_LEN};
pub use mask::mask;
