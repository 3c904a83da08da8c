//! In-memory lookup service.
//!
//! Answers from a table of prefix rules instead of a remote BIN database.
//! Useful for tests, demos and offline development.

use super::{BinLookup, LookupResponse};
use crate::error::LookupError;
use crate::CardBrand;
use std::cmp::Reverse;

/// Largest number of prefixes [`PrefixLookup::insert_range`] accepts at once.
pub const MAX_RANGE_RULES: u64 = 10_000;

/// In-memory lookup service keyed by card number prefix.
///
/// The longest matching prefix wins. A number that matches no rule resolves
/// to an empty record, the way a BIN service answers for an unknown issuer.
///
/// # Example
///
/// ```
/// use card_entry::lookup::PrefixLookup;
///
/// let lookup = PrefixLookup::standard();
/// assert_eq!(lookup.find("41474"), Some("visa"));
/// assert_eq!(lookup.find("347123"), Some("amex"));
/// assert_eq!(lookup.find("abc567"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrefixLookup {
    /// Rules sorted by descending prefix length.
    rules: Vec<PrefixRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PrefixRule {
    prefix: String,
    scheme: String,
}

impl PrefixLookup {
    /// Creates a lookup with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates a lookup for the four networks the field has logos for.
    ///
    /// - Visa: 4
    /// - Mastercard: 51-55
    /// - Discover: 6011, 65
    /// - American Express: 34, 37
    pub fn standard() -> Self {
        let mut lookup = Self::new();
        lookup.insert("4", CardBrand::Visa.scheme());
        lookup.insert_range("51", "55", CardBrand::Mastercard.scheme());
        lookup.insert("6011", CardBrand::Discover.scheme());
        lookup.insert("65", CardBrand::Discover.scheme());
        lookup.insert("34", CardBrand::Amex.scheme());
        lookup.insert("37", CardBrand::Amex.scheme());
        lookup
    }

    /// Adds a rule mapping `prefix` to `scheme`.
    ///
    /// Non-digit prefixes are ignored.
    pub fn insert(&mut self, prefix: &str, scheme: &str) {
        if self.push_rule(prefix, scheme) {
            self.sort_rules();
        }
    }

    /// Adds one rule per prefix in an inclusive range of equal-length prefixes.
    ///
    /// Ranges with mismatched lengths, a start after the end, or more than
    /// [`MAX_RANGE_RULES`] prefixes are ignored.
    pub fn insert_range(&mut self, start: &str, end: &str, scheme: &str) {
        if start.len() != end.len() {
            return;
        }
        let (Ok(first), Ok(last)) = (start.parse::<u64>(), end.parse::<u64>()) else {
            return;
        };
        if first > last {
            return;
        }
        if last - first >= MAX_RANGE_RULES {
            tracing::warn!(start, end, "prefix range too large, ignored");
            return;
        }

        let mut added = false;
        for value in first..=last {
            added |= self.push_rule(&format!("{:0width$}", value, width = start.len()), scheme);
        }
        if added {
            self.sort_rules();
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_rule(mut self, prefix: &str, scheme: &str) -> Self {
        self.insert(prefix, scheme);
        self
    }

    /// Returns the scheme for the longest rule `number` starts with.
    pub fn find(&self, number: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| number.starts_with(&rule.prefix))
            .map(|rule| rule.scheme.as_str())
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn push_rule(&mut self, prefix: &str, scheme: &str) -> bool {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        self.rules.push(PrefixRule {
            prefix: prefix.to_string(),
            scheme: scheme.to_string(),
        });
        true
    }

    /// Longest prefix first; stable, so earlier rules win ties.
    fn sort_rules(&mut self) {
        self.rules.sort_by_key(|rule| Reverse(rule.prefix.len()));
    }
}

impl BinLookup for PrefixLookup {
    async fn lookup(&self, number: &str) -> Result<LookupResponse, LookupError> {
        Ok(match self.find(number) {
            Some(scheme) => LookupResponse::with_scheme(scheme),
            None => LookupResponse::new(),
        })
    }
}
