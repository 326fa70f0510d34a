//! Identifier syntax rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// The SId production: a letter or underscore, then letters, digits,
    /// and underscores.
    static ref SID: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();

    /// XML 1.0 NCName, restricted to ASCII as the schema's tooling does.
    static ref METAID: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9._\-]*$").unwrap();
}

pub fn is_valid_sid(s: &str) -> bool {
    SID.is_match(s)
}

pub fn is_valid_metaid(s: &str) -> bool {
    METAID.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sid_syntax() {
        assert!(is_valid_sid("task1"));
        assert!(is_valid_sid("_a"));
        assert!(!is_valid_sid("1task"));
        assert!(!is_valid_sid("task-1"));
        assert!(!is_valid_sid(""));
    }

    #[test]
    fn metaid_syntax() {
        assert!(is_valid_metaid("meta_1"));
        assert!(is_valid_metaid("a.b-c"));
        assert!(!is_valid_metaid(".leading"));
        assert!(!is_valid_metaid("has space"));
    }
}
