//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use integrity::SecretEnvelopeCipher;

/// Application state shared across all request handlers.
///
/// Every field is immutable after startup, so handlers never contend on it.
#[derive(Clone)]
pub struct AppState {
    /// Cipher keyed from the configured credentials passphrase.
    pub cipher: Arc<SecretEnvelopeCipher>,
    /// Upper bound on identifiers per batch verification request.
    pub max_batch_size: usize,
}

impl AppState {
    /// Create a new [`AppState`] from a ready cipher and batch limit.
    pub fn new(cipher: SecretEnvelopeCipher, max_batch_size: usize) -> Self {
        Self {
            cipher: Arc::new(cipher),
            max_batch_size,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State keyed with a fixed test passphrase.
    pub fn for_tests() -> Self {
        let passphrase = integrity::Passphrase::new("test-only-passphrase-0123456789abcdef");
        let cipher = SecretEnvelopeCipher::new(&passphrase).expect("valid test passphrase");
        Self::new(cipher, 4)
    }
}
