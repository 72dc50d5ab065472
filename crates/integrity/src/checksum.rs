//! Check symbols for 10-symbol learner identifiers.
//!
//! An identifier is a 9-symbol payload followed by one check symbol computed
//! with Luhn mod N over [`alphabet::ALPHABET`](crate::alphabet::ALPHABET).
//! Verification is a local pre-check only: it catches single-symbol
//! substitutions and most adjacent transpositions before an identifier is
//! ever sent to the remote registry.
//!
//! # Algorithm
//!
//! Scanning the payload right to left with a factor that starts at 2 and
//! alternates 2, 1, 2, ...:
//!
//! ```text
//! addend = factor * index(symbol)
//! addend = addend / N + addend % N
//! sum   += addend
//! check  = symbol_at((N - sum % N) % N)
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::alphabet::{self, N};

/// Number of payload symbols preceding the check symbol.
pub const PAYLOAD_LEN: usize = 9;

/// Total identifier length, check symbol included.
pub const IDENTIFIER_LEN: usize = PAYLOAD_LEN + 1;

/// Reasons an identifier or payload fails the checksum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// Input has the wrong number of symbols.
    #[error("malformed input: expected {expected} symbols, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// A symbol is outside the alphabet (`0`, `1`, `I`, `O`, punctuation, ...).
    #[error("malformed input: symbol {symbol:?} at position {position} is not in the alphabet")]
    InvalidSymbol { symbol: char, position: usize },

    /// Well-formed, but the trailing symbol is not the computed check symbol.
    #[error("check symbol mismatch: expected {expected}, found {found}")]
    Mismatch { expected: char, found: char },
}

impl ChecksumError {
    /// `true` for the malformed-input class (length or charset), `false` for
    /// a genuine check symbol mismatch.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ChecksumError::Mismatch { .. })
    }
}

/// Uppercase `input` and confirm it has exactly `expected` symbols.
fn canonical(input: &str, expected: usize) -> Result<Vec<char>, ChecksumError> {
    let symbols: Vec<char> = input.chars().map(|c| c.to_ascii_uppercase()).collect();
    if symbols.len() != expected {
        return Err(ChecksumError::WrongLength {
            expected,
            actual: symbols.len(),
        });
    }
    Ok(symbols)
}

fn check_symbol_of(payload: &[char]) -> Result<char, ChecksumError> {
    let mut factor = 2;
    let mut sum = 0;
    for (position, &symbol) in payload.iter().enumerate().rev() {
        let index = alphabet::index_of(symbol)
            .ok_or(ChecksumError::InvalidSymbol { symbol, position })?;
        let addend = factor * index;
        sum += addend / N + addend % N;
        factor = if factor == 2 { 1 } else { 2 };
    }
    Ok(alphabet::symbol_at((N - sum % N) % N))
}

/// Compute the check symbol for a 9-symbol payload.
///
/// The payload is uppercased first.
///
/// # Errors
///
/// Returns [`ChecksumError::WrongLength`] or [`ChecksumError::InvalidSymbol`]
/// for malformed payloads.
pub fn compute_check_symbol(payload: &str) -> Result<char, ChecksumError> {
    let symbols = canonical(payload, PAYLOAD_LEN)?;
    check_symbol_of(&symbols)
}

/// Append the check symbol to `payload`, producing a full uppercase identifier.
pub fn append_check_symbol(payload: &str) -> Result<String, ChecksumError> {
    let mut symbols = canonical(payload, PAYLOAD_LEN)?;
    let check = check_symbol_of(&symbols)?;
    symbols.push(check);
    Ok(symbols.into_iter().collect())
}

/// Verify an identifier, reporting why it failed.
///
/// Case is normalised before both the length and the charset checks.
pub fn check(identifier: &str) -> Result<(), ChecksumError> {
    let symbols = canonical(identifier, IDENTIFIER_LEN)?;
    let (payload, found) = symbols.split_at(PAYLOAD_LEN);
    let found = found[0];
    if !alphabet::is_member(found) {
        return Err(ChecksumError::InvalidSymbol {
            symbol: found,
            position: PAYLOAD_LEN,
        });
    }
    let expected = check_symbol_of(payload)?;
    if expected != found {
        return Err(ChecksumError::Mismatch { expected, found });
    }
    Ok(())
}

/// Boolean form of [`check`]. Fails closed: any malformed input is `false`.
pub fn verify(identifier: &str) -> bool {
    check(identifier).is_ok()
}

/// A learner identifier whose check symbol has been verified.
///
/// Always held in canonical uppercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LearnerId(String);

impl LearnerId {
    /// Verify `identifier` and wrap its canonical form.
    pub fn parse(identifier: &str) -> Result<Self, ChecksumError> {
        check(identifier)?;
        Ok(Self(identifier.to_ascii_uppercase()))
    }

    /// The 9 payload symbols.
    pub fn payload(&self) -> &str {
        &self.0[..PAYLOAD_LEN]
    }

    pub fn check_symbol(&self) -> char {
        self.0.as_bytes()[PAYLOAD_LEN] as char
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LearnerId {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LearnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
