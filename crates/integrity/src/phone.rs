//! Canonical phone numbers for messaging destinations.
//!
//! This is a validator, not a parser: no country code is inferred and no
//! punctuation is stripped. Input must already be `+` followed by 6 to 15
//! digits, optionally behind a single channel tag such as `whatsapp:`.

use thiserror::Error;

/// Channel tags stripped before validation. Matched ASCII case-insensitively.
pub const CHANNEL_PREFIXES: [&str; 3] = ["whatsapp:", "sms:", "tel:"];

pub const MIN_DIGITS: usize = 6;
pub const MAX_DIGITS: usize = 15;

/// The input is not an E.164 number.
///
/// The message never includes the rejected number itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("invalid phone number: {0}")]
    InvalidFormat(String),
}

fn strip_channel_prefix(input: &str) -> &str {
    for prefix in CHANNEL_PREFIXES {
        if input.len() >= prefix.len()
            && input.is_char_boundary(prefix.len())
            && input[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return &input[prefix.len()..];
        }
    }
    input
}

/// Normalise `raw` to canonical `+<digits>` form.
///
/// Trims surrounding whitespace, strips at most one channel tag, then requires
/// the remainder to match `^\+\d{6,15}$`. Canonical output is returned
/// unchanged by a second call.
///
/// # Errors
///
/// Returns [`PhoneError::InvalidFormat`] for anything else.
pub fn normalize(raw: &str) -> Result<String, PhoneError> {
    let candidate = strip_channel_prefix(raw.trim()).trim();

    let digits = candidate.strip_prefix('+').ok_or_else(|| {
        PhoneError::InvalidFormat("must start with '+' and a country code".into())
    })?;

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PhoneError::InvalidFormat(
            "only digits may follow the leading '+'".into(),
        ));
    }
    if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
        return Err(PhoneError::InvalidFormat(format!(
            "expected {MIN_DIGITS} to {MAX_DIGITS} digits, got {}",
            digits.len()
        )));
    }

    Ok(candidate.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_input_passes_through() {
        assert_eq!(normalize("+61412345678").unwrap(), "+61412345678");
    }

    #[test]
    fn strips_whatsapp_prefix() {
        assert_eq!(normalize("whatsapp:+61412345678").unwrap(), "+61412345678");
        assert_eq!(normalize("WhatsApp:+61412345678").unwrap(), "+61412345678");
    }

    #[test]
    fn strips_other_channel_prefixes() {
        assert_eq!(normalize("sms:+14155551234").unwrap(), "+14155551234");
        assert_eq!(normalize("tel:+14155551234").unwrap(), "+14155551234");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize("  +61412345678\n").unwrap(), "+61412345678");
        assert_eq!(normalize(" whatsapp: +61412345678 ").unwrap(), "+61412345678");
    }

    #[test]
    fn rejects_national_format() {
        assert!(matches!(
            normalize("0412345678"),
            Err(PhoneError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_too_few_digits() {
        assert!(normalize("+123").is_err());
        assert!(normalize("+12345").is_err());
        assert_eq!(normalize("+123456").unwrap(), "+123456");
    }

    #[test]
    fn rejects_too_many_digits() {
        assert!(normalize("+1234567890123456").is_err());
        assert!(normalize("+123456789012345").is_ok());
    }

    #[test]
    fn rejects_punctuation_and_spaces_inside() {
        assert!(normalize("+1 (415) 555-1234").is_err());
        assert!(normalize("+61 412 345 678").is_err());
        assert!(normalize("++61412345678").is_err());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert!(normalize("+٦١٤١٢٣٤٥٦٧٨").is_err());
    }

    #[test]
    fn only_one_prefix_is_stripped() {
        assert!(normalize("whatsapp:whatsapp:+61412345678").is_err());
    }

    #[test]
    fn unknown_prefix_rejected() {
        assert!(normalize("signal:+61412345678").is_err());
    }

    #[test]
    fn error_does_not_echo_input() {
        let err = normalize("0412345678").unwrap_err();
        assert!(!err.to_string().contains("0412345678"));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(normalize("").is_err());
        assert!(normalize("whatsapp:").is_err());
    }
}
