//! Card network types for the entry field.
//!
//! The field only distinguishes the networks it has a dedicated logo and
//! grouping for. Any other scheme the lookup service reports collapses into
//! `CardBrand::Generic`.

use std::fmt;

/// Card networks recognized by the entry field.
///
/// "No brand" is not a variant: fields that may be unclassified hold an
/// `Option<CardBrand>`, with `None` meaning unknown or not yet looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    /// Visa - scheme `visa`
    Visa,
    /// Mastercard - scheme `mastercard`
    Mastercard,
    /// Discover - scheme `discover`
    Discover,
    /// American Express - scheme `amex`, grouped 4-6-5
    Amex,
    /// Any other scheme reported by the lookup service.
    Generic,
}

impl CardBrand {
    /// Brands with a dedicated scheme identifier.
    pub const KNOWN: [CardBrand; 4] = [
        CardBrand::Amex,
        CardBrand::Discover,
        CardBrand::Mastercard,
        CardBrand::Visa,
    ];

    /// Maps a lookup service scheme to a brand.
    ///
    /// Matching is exact. Unrecognized schemes become `Generic`.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::CardBrand;
    ///
    /// assert_eq!(CardBrand::from_scheme("amex"), CardBrand::Amex);
    /// assert_eq!(CardBrand::from_scheme("jcb"), CardBrand::Generic);
    /// ```
    pub fn from_scheme(scheme: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|brand| brand.scheme() == scheme)
            .unwrap_or(Self::Generic)
    }

    /// Returns the scheme identifier used by the lookup service.
    #[inline]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Discover => "discover",
            Self::Amex => "amex",
            Self::Generic => "generic",
        }
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Discover => "Discover",
            Self::Amex => "American Express",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Minimum number of characters before the lookup service is queried.
pub const MIN_LOOKUP_LENGTH: usize = 4;
