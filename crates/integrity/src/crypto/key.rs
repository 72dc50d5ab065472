//! Passphrase handling and key derivation.

use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::cipher::CipherError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Minimum passphrase length, counted in characters.
pub const MIN_PASSPHRASE_LEN: usize = 32;

/// Operator-supplied passphrase, typically read from process configuration.
///
/// Never printed: [`Debug`] is redacted and there is no `Display`.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Reject absent or short passphrases.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::KeyConfiguration`] if the passphrase is empty or
    /// shorter than [`MIN_PASSPHRASE_LEN`] characters.
    pub fn validate(&self) -> Result<(), CipherError> {
        let len = self.0.chars().count();
        if len == 0 {
            return Err(CipherError::KeyConfiguration(
                "passphrase is not configured".into(),
            ));
        }
        if len < MIN_PASSPHRASE_LEN {
            return Err(CipherError::KeyConfiguration(format!(
                "passphrase must be at least {MIN_PASSPHRASE_LEN} characters, got {len}"
            )));
        }
        Ok(())
    }

    /// Validate, then derive the AES key as `SHA-256(passphrase)`.
    pub fn derive_key(&self) -> Result<DerivedKey, CipherError> {
        self.validate()?;
        let digest = Sha256::digest(self.0.as_bytes());
        let mut key = Box::new([0u8; KEY_LEN]);
        key.copy_from_slice(&digest);
        Ok(DerivedKey(key))
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}

/// Fixed-size key buffer derived from a [`Passphrase`].
///
/// Overwritten with zeroes on drop.
#[derive(Clone)]
pub struct DerivedKey(Box<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("DerivedKey([REDACTED])")
    }
}
