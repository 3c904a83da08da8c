//! Error types for the entry field.
//!
//! Runtime failures never reach the caller of the event handlers: a failed
//! lookup degrades to a user-visible message. These types cover the lookup
//! contract and invalid configuration at construction.

use std::fmt;

/// Errors reported by a [`BinLookup`](crate::lookup::BinLookup) implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The service rejected the request or could not be reached.
    Service(String),

    /// The service answered with something that is not a JSON object.
    Malformed(String),

    /// No issuer record matched the number.
    NotFound,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(reason) => write!(f, "lookup service failed: {}", reason),
            Self::Malformed(reason) => write!(f, "malformed lookup response: {}", reason),
            Self::NotFound => write!(f, "no issuer record matched the card number"),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Errors raised while building a [`CardInput`](crate::CardInput) from its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The separator pattern was empty.
    EmptySeparator,

    /// The separator pattern is not a valid regular expression.
    InvalidSeparator {
        /// The pattern as configured.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },

    /// The group delimiter would survive normalization.
    ///
    /// Formatted text is fed back through the normalizer on every keystroke,
    /// so the delimiter must consist solely of separator characters.
    DelimiterNotStripped {
        /// The delimiter as configured.
        delimiter: String,
        /// The separator pattern that fails to remove it.
        pattern: String,
    },

    /// The minimum lookup length was zero.
    ZeroLookupLength,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySeparator => write!(f, "separator pattern is empty"),

            Self::InvalidSeparator { pattern, reason } => {
                write!(f, "invalid separator pattern '{}': {}", pattern, reason)
            }

            Self::DelimiterNotStripped { delimiter, pattern } => {
                write!(
                    f,
                    "delimiter '{}' is not removed by separator pattern '{}'",
                    delimiter.escape_default(),
                    pattern
                )
            }

            Self::ZeroLookupLength => write!(f, "minimum lookup length must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
