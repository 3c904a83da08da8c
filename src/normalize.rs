//! Separator stripping for raw field input.
//!
//! Whatever the user sees in the field (typed characters plus the group
//! delimiters inserted by the formatter) is normalized back to the bare
//! character sequence before any other stage looks at it.
//!
//! # Example
//!
//! ```
//! use card_entry::normalize::{normalize, Separator};
//!
//! assert_eq!(normalize("4147 9344\t2346"), "414793442346");
//!
//! let dashes = Separator::new("-").unwrap();
//! assert_eq!(dashes.normalize("4147-9344 2346"), "41479344 2346");
//! ```

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default separator pattern: any whitespace.
pub const DEFAULT_SEPARATOR: &str = r"\s";

static DEFAULT: Lazy<Separator> = Lazy::new(|| {
    Separator::new(DEFAULT_SEPARATOR).expect("default separator pattern is valid")
});

/// A compiled separator pattern.
///
/// The pattern is a regex fragment; every run of matches is removed from the
/// input. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Separator {
    pattern: String,
    strip: Regex,
}

impl Separator {
    /// Compiles a separator pattern.
    ///
    /// # Errors
    ///
    /// `ConfigError::EmptySeparator` for an empty pattern and
    /// `ConfigError::InvalidSeparator` when the regex does not compile.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }

        let invalid = |err: regex::Error| ConfigError::InvalidSeparator {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        };

        // The fragment is spliced into larger patterns, so it must stand alone.
        Regex::new(pattern).map_err(invalid)?;
        let strip = Regex::new(&format!("(?:{})+", pattern)).map_err(invalid)?;

        Ok(Self {
            pattern: pattern.to_string(),
            strip,
        })
    }

    /// Returns the pattern as configured.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Removes every separator match from `input`, preserving the order of
    /// the remaining characters.
    ///
    /// Stripping repeats until nothing more matches, so multi-character
    /// patterns cannot reassemble out of what is left and the result is
    /// always idempotent.
    pub fn normalize(&self, input: &str) -> String {
        let mut current = input.to_string();
        loop {
            let next = self.strip.replace_all(&current, "");
            if next.len() == current.len() {
                return current;
            }
            current = next.into_owned();
        }
    }

    /// Returns true if `text` disappears entirely under normalization.
    #[inline]
    pub fn strips(&self, text: &str) -> bool {
        self.normalize(text).is_empty()
    }
}

impl Default for Separator {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

/// Normalizes `input` with the default whitespace separator.
pub fn normalize(input: &str) -> String {
    DEFAULT.normalize(input)
}
