//! Structural validation run when the field loses focus.
//!
//! A value passes when it consists of exactly the digit groups of the active
//! brand's layout, optionally separated by separator runs. This is a shape
//! check only. No checksum is computed.
//!
//! # Example
//!
//! ```
//! use card_entry::validate::{Validator, ValidationStatus};
//! use card_entry::CardBrand;
//!
//! let validator = Validator::default();
//! assert_eq!(validator.validate("4111 1111 1111 1111", Some(CardBrand::Visa)), ValidationStatus::Pass);
//! assert_eq!(validator.validate("411111111111111", None), ValidationStatus::Fail);
//! assert_eq!(validator.validate("347123456789012", Some(CardBrand::Amex)), ValidationStatus::Pass);
//! ```

use crate::error::ConfigError;
use crate::format::{grouping_for_brand, AMEX_GROUPS, STANDARD_GROUPS};
use crate::normalize::Separator;
use crate::CardBrand;
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT: Lazy<Validator> = Lazy::new(|| {
    Validator::new(&Separator::default()).expect("default validation patterns are valid")
});

/// Outcome of the last blur validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationStatus {
    /// The field has not been blurred yet.
    #[default]
    Unset,
    /// The value has the complete shape for its brand.
    Pass,
    /// The value is incomplete or malformed.
    Fail,
}

impl ValidationStatus {
    /// Returns true for `Pass`.
    #[inline]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the label shown next to the status icon, empty when unset.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

/// Compiled structural patterns for one separator configuration.
#[derive(Debug, Clone)]
pub struct Validator {
    separator: Separator,
    standard: Regex,
    amex: Regex,
}

impl Validator {
    /// Builds the standard and Amex patterns around `separator`.
    pub fn new(separator: &Separator) -> Result<Self, ConfigError> {
        let compile = |groups: &[usize]| {
            Regex::new(&structural_pattern(groups, separator.pattern())).map_err(|err| {
                ConfigError::InvalidSeparator {
                    pattern: separator.pattern().to_string(),
                    reason: err.to_string(),
                }
            })
        };

        Ok(Self {
            separator: separator.clone(),
            standard: compile(&STANDARD_GROUPS)?,
            amex: compile(&AMEX_GROUPS)?,
        })
    }

    /// Validates field text against the layout of `brand`.
    ///
    /// The text is normalized first, so it may be passed exactly as displayed.
    pub fn validate(&self, text: &str, brand: Option<CardBrand>) -> ValidationStatus {
        let raw = self.separator.normalize(text);
        let pattern = match brand {
            Some(CardBrand::Amex) => &self.amex,
            _ => &self.standard,
        };

        let status = if pattern.is_match(&raw) {
            ValidationStatus::Pass
        } else {
            ValidationStatus::Fail
        };
        tracing::debug!(
            length = raw.chars().count(),
            groups = ?grouping_for_brand(brand),
            status = status.label(),
            "validated card number"
        );
        status
    }
}

impl Default for Validator {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

/// Builds an anchored pattern of ASCII digit groups joined by optional
/// separator runs, e.g. `^([0-9]{4})(?:\s)*([0-9]{6})(?:\s)*([0-9]{5})$`.
fn structural_pattern(groups: &[usize], separator: &str) -> String {
    let gap = format!("(?:{})*", separator);
    let body: Vec<String> = groups
        .iter()
        .map(|size| format!("([0-9]{{{}}})", size))
        .collect();
    format!("^{}$", body.join(&gap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_pattern() {
        assert_eq!(
            structural_pattern(&AMEX_GROUPS, r"\s"),
            r"^([0-9]{4})(?:\s)*([0-9]{6})(?:\s)*([0-9]{5})$"
        );
    }

    #[test]
    fn test_standard_pass() {
        let v = Validator::default();
        assert_eq!(v.validate("4111111111111111", None), ValidationStatus::Pass);
        assert_eq!(v.validate("4111111111111111", Some(CardBrand::Visa)), ValidationStatus::Pass);
        assert_eq!(v.validate("4147 9344 2346 9281", Some(CardBrand::Visa)), ValidationStatus::Pass);
        assert_eq!(v.validate("4147  9344\t2346 9281", Some(CardBrand::Visa)), ValidationStatus::Pass);
    }

    #[test]
    fn test_standard_fail() {
        let v = Validator::default();
        assert_eq!(v.validate("411111111111111", None), ValidationStatus::Fail);
        assert_eq!(v.validate("41479344", Some(CardBrand::Visa)), ValidationStatus::Fail);
        assert_eq!(v.validate("41111111111111112", Some(CardBrand::Visa)), ValidationStatus::Fail);
        assert_eq!(v.validate("abc56789012", None), ValidationStatus::Fail);
        assert_eq!(v.validate("", None), ValidationStatus::Fail);
    }

    #[test]
    fn test_amex() {
        let v = Validator::default();
        assert_eq!(v.validate("347123456789012", Some(CardBrand::Amex)), ValidationStatus::Pass);
        assert_eq!(v.validate("3471 234567 89012", Some(CardBrand::Amex)), ValidationStatus::Pass);
        assert_eq!(v.validate("3471234567890123", Some(CardBrand::Amex)), ValidationStatus::Fail);
        // Without the brand, 15 digits are incomplete.
        assert_eq!(v.validate("347123456789012", None), ValidationStatus::Fail);
    }

    #[test]
    fn test_non_ascii_digits_fail() {
        let v = Validator::default();
        // Arabic-Indic digits are Unicode \d but not card digits.
        assert_eq!(
            v.validate("٤١١١٤١١١٤١١١٤١١١", None),
            ValidationStatus::Fail
        );
    }

    #[test]
    fn test_custom_separator() {
        let sep = Separator::new("-").unwrap();
        let v = Validator::new(&sep).unwrap();
        assert_eq!(v.validate("4111-1111-1111-1111", None), ValidationStatus::Pass);
        assert_eq!(v.validate("4111 1111 1111 1111", None), ValidationStatus::Fail);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ValidationStatus::default(), ValidationStatus::Unset);
        assert_eq!(ValidationStatus::Unset.label(), "");
        assert_eq!(ValidationStatus::Pass.label(), "Pass");
        assert!(ValidationStatus::Pass.is_pass());
        assert!(!ValidationStatus::Fail.is_pass());
    }
}
