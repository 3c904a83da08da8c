//! Session state of one entry field.
//!
//! The state is plain data. Every mutation goes through a small transition
//! method that reports whether anything changed, and the controller decides
//! which transitions an event triggers.

use crate::classify::{Classification, LookupRequest};
use crate::mask::mask_partial;
use crate::validate::ValidationStatus;
use crate::CardBrand;
use std::fmt;
use zeroize::Zeroize;

/// Events the field forwards to its controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The field text changed.
    InputChanged(String),
    /// The field lost focus with the given text.
    Blurred(String),
    /// A previously issued lookup finished.
    LookupCompleted(LookupRequest, Classification),
}

/// Everything the entry field knows about its current value.
///
/// Card data is zeroized when the state is dropped and masked in `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardInputState {
    raw_input: String,
    display: String,
    brand: Option<CardBrand>,
    status: ValidationStatus,
    error_message: Option<String>,
    lookup_in_flight: bool,
    generation: u64,
}

impl CardInputState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the normalized input.
    #[inline]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Returns the text shown in the field.
    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the brand of the last applied classification.
    #[inline]
    pub const fn brand(&self) -> Option<CardBrand> {
        self.brand
    }

    /// Returns the result of the last blur.
    #[inline]
    pub const fn status(&self) -> ValidationStatus {
        self.status
    }

    /// Returns the message shown under the field, if any.
    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns true while a lookup is outstanding.
    #[inline]
    pub const fn lookup_in_flight(&self) -> bool {
        self.lookup_in_flight
    }

    /// Returns a counter bumped on every change of the normalized input.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of characters in the normalized input.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.raw_input.chars().count()
    }

    /// Stores freshly normalized input.
    ///
    /// The display mirrors the typed value until the next reformat. Returns
    /// false, and leaves the generation alone, when the input is unchanged.
    pub(crate) fn replace_input(&mut self, raw: String) -> bool {
        if raw == self.raw_input {
            return false;
        }
        self.raw_input.zeroize();
        self.display.zeroize();
        self.display = raw.clone();
        self.raw_input = raw;
        self.generation += 1;
        true
    }

    /// Sets the display text unless it is already current.
    pub(crate) fn set_display(&mut self, display: String) -> bool {
        if display == self.display {
            return false;
        }
        self.display.zeroize();
        self.display = display;
        true
    }

    /// Clears brand and message. Returns true if either was set.
    pub(crate) fn clear_classification(&mut self) -> bool {
        let changed = self.brand.is_some() || self.error_message.is_some();
        self.brand = None;
        self.error_message = None;
        changed
    }

    /// Applies a lookup outcome. Returns true if the brand changed.
    pub(crate) fn apply_classification(&mut self, outcome: &Classification) -> bool {
        if !outcome.changes_state() {
            return false;
        }
        let previous = self.brand;
        self.brand = outcome.brand();
        self.error_message = outcome.error_message().map(str::to_string);
        previous != self.brand
    }

    pub(crate) fn set_status(&mut self, status: ValidationStatus) {
        self.status = status;
    }

    /// Claims the in-flight guard. Returns false if it was already held.
    pub(crate) fn begin_lookup(&mut self) -> bool {
        if self.lookup_in_flight {
            return false;
        }
        self.lookup_in_flight = true;
        true
    }

    pub(crate) fn end_lookup(&mut self) {
        self.lookup_in_flight = false;
    }
}

impl fmt::Debug for CardInputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInputState")
            .field("raw_input", &mask_partial(&self.raw_input))
            .field("brand", &self.brand)
            .field("status", &self.status)
            .field("error_message", &self.error_message)
            .field("lookup_in_flight", &self.lookup_in_flight)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Drop for CardInputState {
    fn drop(&mut self) {
        self.raw_input.zeroize();
        self.display.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LOOKUP_FAILED_MESSAGE;
    use crate::error::LookupError;

    #[test]
    fn test_initial_state() {
        let state = CardInputState::new();
        assert_eq!(state.raw_input(), "");
        assert_eq!(state.display(), "");
        assert_eq!(state.brand(), None);
        assert_eq!(state.status(), ValidationStatus::Unset);
        assert_eq!(state.error_message(), None);
        assert!(!state.lookup_in_flight());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn test_replace_input() {
        let mut state = CardInputState::new();
        assert!(state.replace_input("41474".into()));
        assert_eq!(state.display(), "41474");
        assert_eq!(state.generation(), 1);

        assert!(!state.replace_input("41474".into()));
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_set_display_reports_change() {
        let mut state = CardInputState::new();
        state.replace_input("41474".into());
        assert!(state.set_display("4147 4".into()));
        assert!(!state.set_display("4147 4".into()));
    }

    #[test]
    fn test_apply_classification() {
        let mut state = CardInputState::new();
        assert!(state.apply_classification(&Classification::Recognized(CardBrand::Visa)));
        assert_eq!(state.brand(), Some(CardBrand::Visa));
        assert_eq!(state.error_message(), None);

        assert!(!state.apply_classification(&Classification::Unclassified));
        assert_eq!(state.brand(), Some(CardBrand::Visa));

        assert!(state.apply_classification(&Classification::Failed(LookupError::NotFound)));
        assert_eq!(state.brand(), None);
        assert_eq!(state.error_message(), Some(LOOKUP_FAILED_MESSAGE));

        assert!(state.clear_classification());
        assert_eq!(state.error_message(), None);
        assert!(!state.clear_classification());
    }

    #[test]
    fn test_lookup_guard() {
        let mut state = CardInputState::new();
        assert!(state.begin_lookup());
        assert!(!state.begin_lookup());
        state.end_lookup();
        assert!(state.begin_lookup());
    }

    #[test]
    fn test_debug_is_masked() {
        let mut state = CardInputState::new();
        state.replace_input("4147934423469281".into());
        let debug = format!("{:?}", state);
        assert!(!debug.contains("4147934423469281"));
        assert!(debug.contains("9281"));
    }
}
