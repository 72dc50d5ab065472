//! Display formatting for stored secrets. Not a security boundary.

const MASK: &str = "****";
const VISIBLE: usize = 4;

/// Render `secret` as `****` plus its last four characters.
///
/// Secrets of four characters or fewer are shown as `****` only, so short
/// values are never displayed in full.
pub fn mask(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= VISIBLE {
        return MASK.to_owned();
    }
    let tail: String = secret.chars().skip(len - VISIBLE).collect();
    format!("{MASK}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_last_four() {
        assert_eq!(mask("sk_live_abcdef123456"), "****3456");
    }

    #[test]
    fn short_secrets_fully_masked() {
        assert_eq!(mask(""), "****");
        assert_eq!(mask("abcd"), "****");
        assert_eq!(mask("abcde"), "****bcde");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(mask("clé-secrète"), "****rète");
    }
}
