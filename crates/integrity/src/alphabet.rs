//! The 32-symbol alphabet used by learner identifiers.
//!
//! Digits `0`/`1` and letters `I`/`O` are excluded because they are easily
//! confused with each other when read aloud or copied by hand.

/// Alphabet size, and the modulus of the checksum arithmetic.
pub const N: usize = 32;

/// Ordered symbol set. A symbol's position is its checksum index.
pub const ALPHABET: [u8; N] = *b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

const NOT_A_MEMBER: u8 = u8::MAX;

/// ASCII-indexed reverse lookup, built at compile time.
const INDEX: [u8; 128] = build_index();

const fn build_index() -> [u8; 128] {
    let mut table = [NOT_A_MEMBER; 128];
    let mut i = 0;
    while i < N {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the checksum index of `symbol`, or `None` if it is not a member.
///
/// Lookup is case-sensitive: callers normalise to uppercase first.
pub fn index_of(symbol: char) -> Option<usize> {
    if !symbol.is_ascii() {
        return None;
    }
    match INDEX[symbol as usize] {
        NOT_A_MEMBER => None,
        i => Some(i as usize),
    }
}

/// Returns the symbol at `index` (taken modulo [`N`]).
pub fn symbol_at(index: usize) -> char {
    ALPHABET[index % N] as char
}

pub fn is_member(symbol: char) -> bool {
    index_of(symbol).is_some()
}
