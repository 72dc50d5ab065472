//! Shape check for third-party message template identifiers.
//!
//! Not a security boundary; it rejects obvious garbage before a template id is
//! persisted next to an encrypted provider credential.

pub const MIN_TEMPLATE_ID_LEN: usize = 6;

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
}

/// `true` if `candidate` has at least [`MIN_TEMPLATE_ID_LEN`] characters, all
/// drawn from ASCII letters, digits, `_`, `-`, `:` and `.`.
pub fn is_valid_template_id(candidate: &str) -> bool {
    candidate.chars().count() >= MIN_TEMPLATE_ID_LEN && candidate.chars().all(is_allowed)
}
