//! AES-256-GCM encryption and decryption of opaque credential secrets.
//!
//! **A fresh 96-bit IV is drawn from the OS CSPRNG on every call.** GCM IV
//! reuse under one key is catastrophic: it breaks both confidentiality and
//! authentication. Never accept an IV from the caller.

use aes_gcm::{
    aead::{AeadCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::key::{DerivedKey, Passphrase};

/// Byte length of an AES-GCM IV (12 bytes = 96 bits).
pub const IV_LEN: usize = 12;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The passphrase is missing or shorter than the minimum.
    #[error("key configuration error: {0}")]
    KeyConfiguration(String),

    /// The envelope did not authenticate: tampered, corrupted, truncated, not
    /// valid base64, or sealed under a different key. No plaintext is returned.
    #[error("envelope failed integrity check")]
    Integrity,

    /// AES-GCM encryption failed (unreachable with a valid key and IV).
    #[error("aead encryption failed")]
    Encryption,
}

/// A sealed secret split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub iv: [u8; IV_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// `iv || tag || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(IV_LEN + TAG_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw envelope bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Integrity`] if fewer than `IV_LEN + TAG_LEN`
    /// bytes are supplied.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        if bytes.len() < IV_LEN + TAG_LEN {
            return Err(CipherError::Integrity);
        }
        let (iv, rest) = bytes.split_at(IV_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);
        let mut env = Envelope {
            iv: [0u8; IV_LEN],
            tag: [0u8; TAG_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        env.iv.copy_from_slice(iv);
        env.tag.copy_from_slice(tag);
        Ok(env)
    }

    /// Encode to the stored text form (standard base64, padded).
    pub fn to_text(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parse the stored text form.
    pub fn from_text(text: &str) -> Result<Self, CipherError> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|_| CipherError::Integrity)?;
        Self::from_bytes(&bytes)
    }
}

/// Seals and opens credential envelopes under one passphrase-derived key.
///
/// Build once from configuration and share; it holds no mutable state.
#[derive(Clone)]
pub struct SecretEnvelopeCipher {
    cipher: Aes256Gcm,
}

impl SecretEnvelopeCipher {
    /// Derive the key from `passphrase` and build the cipher.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::KeyConfiguration`] if the passphrase is missing
    /// or too short. This is an operator error and should abort startup.
    pub fn new(passphrase: &Passphrase) -> Result<Self, CipherError> {
        let key = passphrase.derive_key()?;
        Ok(Self::from_key(&key))
    }

    pub fn from_key(key: &DerivedKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes())),
        }
    }

    /// Encrypt `plaintext` into an [`Envelope`] with a fresh random IV.
    pub fn seal_envelope(&self, plaintext: &[u8]) -> Result<Envelope, CipherError> {
        let iv = Aes256Gcm::generate_nonce(&mut OsRng);
        let mut buffer = plaintext.to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(&iv, b"", buffer.as_mut_slice())
            .map_err(|_| CipherError::Encryption)?;

        let mut env = Envelope {
            iv: [0u8; IV_LEN],
            tag: [0u8; TAG_LEN],
            ciphertext: buffer,
        };
        env.iv.copy_from_slice(&iv);
        env.tag.copy_from_slice(&tag);
        Ok(env)
    }

    /// Verify and decrypt an [`Envelope`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Integrity`] if the tag does not verify. The
    /// working buffer is dropped, so no partial plaintext escapes.
    pub fn open_envelope(&self, envelope: &Envelope) -> Result<Vec<u8>, CipherError> {
        let mut buffer = envelope.ciphertext.clone();
        self.cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(&envelope.iv),
                b"",
                buffer.as_mut_slice(),
                Tag::from_slice(&envelope.tag),
            )
            .map_err(|_| CipherError::Integrity)?;
        Ok(buffer)
    }

    /// Encrypt `plaintext` and return the envelope text.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        Ok(self.seal_envelope(plaintext)?.to_text())
    }

    /// Decode envelope text and decrypt it.
    pub fn open(&self, envelope: &str) -> Result<Vec<u8>, CipherError> {
        let env = Envelope::from_text(envelope)?;
        self.open_envelope(&env)
    }
}

impl std::fmt::Debug for SecretEnvelopeCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretEnvelopeCipher([REDACTED])")
    }
}

/// Encrypt `plaintext` under a key derived from `passphrase`.
///
/// An empty passphrase is treated as absent.
///
/// # Errors
///
/// Returns [`CipherError::KeyConfiguration`] if `passphrase` is shorter than
/// [`MIN_PASSPHRASE_LEN`](super::key::MIN_PASSPHRASE_LEN) characters.
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<String, CipherError> {
    SecretEnvelopeCipher::new(&Passphrase::new(passphrase))?.seal(plaintext)
}

/// Decrypt envelope text produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`CipherError::KeyConfiguration`] under the same passphrase rule as
/// [`encrypt`], and [`CipherError::Integrity`] if the envelope does not
/// authenticate under the derived key.
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<Vec<u8>, CipherError> {
    SecretEnvelopeCipher::new(&Passphrase::new(passphrase))?.open(envelope)
}
