//! URL slug generation for catalog resources.
//!
//! Slugs are derived from the display name: NFKD decomposition drops accents,
//! everything outside [a-z0-9] collapses to a single hyphen. Uniqueness
//! suffixing ("-2", "-3", ...) is handled by the services, which can check
//! the backing table.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Build a slug from a display name. Empty or all-symbol input yields "n-a".
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .to_lowercase();

    let slug = NON_ALNUM
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string();

    if slug.is_empty() {
        "n-a".to_string()
    } else {
        slug
    }
}

/// Append a numeric suffix to a base slug ("dune" -> "dune-2")
pub fn with_suffix(base: &str, n: u32) -> String {
    format!("{}-{}", base, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_name() {
        assert_eq!(slugify("Ursula K. Le Guin"), "ursula-k-le-guin");
    }

    #[test]
    fn test_accents_fold_to_ascii() {
        assert_eq!(slugify("Éditions Gallimard"), "editions-gallimard");
        assert_eq!(slugify("Señor García"), "senor-garcia");
    }

    #[test]
    fn test_symbols_collapse() {
        assert_eq!(slugify("  C++ — The Book!  "), "c-the-book");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(slugify(""), "n-a");
        assert_eq!(slugify("***"), "n-a");
    }

    #[test]
    fn test_suffix() {
        assert_eq!(with_suffix("dune", 2), "dune-2");
    }
}
