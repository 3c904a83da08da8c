//! Interpretation of lookup results.
//!
//! A lookup resolves to one of four outcomes. Only `Recognized` sets a brand;
//! `Empty` and `Failed` look the same to the user and differ only in how they
//! are logged.

use crate::error::LookupError;
use crate::lookup::{BinLookup, LookupResponse};
use crate::mask::mask_partial;
use crate::CardBrand;
use std::fmt;
use zeroize::Zeroize;

/// Message shown when the card network could not be determined.
pub const LOOKUP_FAILED_MESSAGE: &str = "Oh no! Something went wrong.";

/// The interpreted result of one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The record named a scheme. Unknown schemes arrive here as `Generic`.
    Recognized(CardBrand),
    /// The record had no fields at all.
    Empty,
    /// The record had fields but no scheme. Leaves the state untouched.
    Unclassified,
    /// The lookup itself failed.
    Failed(LookupError),
}

impl Classification {
    /// Interprets a lookup record.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::classify::Classification;
    /// use card_entry::lookup::LookupResponse;
    /// use card_entry::CardBrand;
    ///
    /// assert_eq!(
    ///     Classification::from_response(&LookupResponse::with_scheme("diners")),
    ///     Classification::Recognized(CardBrand::Generic)
    /// );
    /// assert_eq!(Classification::from_response(&LookupResponse::new()), Classification::Empty);
    /// ```
    pub fn from_response(response: &LookupResponse) -> Self {
        match response.scheme() {
            Some(scheme) => Self::Recognized(CardBrand::from_scheme(scheme)),
            None if response.is_empty() => Self::Empty,
            None => Self::Unclassified,
        }
    }

    /// Interprets the result of a lookup call.
    pub fn from_result(result: Result<LookupResponse, LookupError>) -> Self {
        match result {
            Ok(response) => Self::from_response(&response),
            Err(err) => Self::Failed(err),
        }
    }

    /// Returns the brand this outcome assigns, if it assigns one.
    ///
    /// `Unclassified` returns `None` as well; use
    /// [`changes_state`](Self::changes_state) to tell it apart.
    pub fn brand(&self) -> Option<CardBrand> {
        match self {
            Self::Recognized(brand) => Some(*brand),
            _ => None,
        }
    }

    /// Returns the user-facing message this outcome sets, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Empty | Self::Failed(_) => Some(LOOKUP_FAILED_MESSAGE),
            Self::Recognized(_) | Self::Unclassified => None,
        }
    }

    /// Returns false for outcomes that leave brand and message as they are.
    pub fn changes_state(&self) -> bool {
        !matches!(self, Self::Unclassified)
    }
}

/// A lookup the controller has decided to issue.
///
/// Created by the controller when the in-flight guard is free and handed
/// back to it with the outcome. The guard stays set until then, so a request
/// must always be completed, whatever the lookup returned.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupRequest {
    number: String,
    generation: u64,
}

impl LookupRequest {
    pub(crate) fn new(number: String, generation: u64) -> Self {
        Self { number, generation }
    }

    /// Returns the normalized input the lookup is for.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the input generation the request was issued at.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs the lookup and interprets the result. Never fails.
    pub async fn resolve<L: BinLookup>(&self, lookup: &L) -> Classification {
        tracing::debug!(number = %mask_partial(&self.number), "starting lookup");
        let result = lookup.lookup(&self.number).await;
        match &result {
            Ok(response) => tracing::debug!(
                number = %mask_partial(&self.number),
                scheme = response.scheme(),
                empty = response.is_empty(),
                "lookup resolved"
            ),
            Err(err) => tracing::error!(
                number = %mask_partial(&self.number),
                error = %err,
                "lookup failed"
            ),
        }
        Classification::from_result(result)
    }
}

impl fmt::Debug for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupRequest")
            .field("number", &mask_partial(&self.number))
            .field("generation", &self.generation)
            .finish()
    }
}

impl Drop for LookupRequest {
    fn drop(&mut self) {
        self.number.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_known_scheme() {
        let outcome = Classification::from_response(&LookupResponse::with_scheme("visa"));
        assert_eq!(outcome, Classification::Recognized(CardBrand::Visa));
        assert_eq!(outcome.brand(), Some(CardBrand::Visa));
        assert_eq!(outcome.error_message(), None);
    }

    #[test]
    fn test_unknown_scheme_downgrades() {
        let outcome = Classification::from_response(&LookupResponse::with_scheme("jcb"));
        assert_eq!(outcome.brand(), Some(CardBrand::Generic));
        assert_eq!(outcome.error_message(), None);
    }

    #[test]
    fn test_empty_record() {
        let outcome = Classification::from_response(&LookupResponse::new());
        assert_eq!(outcome, Classification::Empty);
        assert_eq!(outcome.brand(), None);
        assert_eq!(outcome.error_message(), Some(LOOKUP_FAILED_MESSAGE));
    }

    #[test]
    fn test_record_without_scheme() {
        let response = LookupResponse::new().field("type", "credit");
        let outcome = Classification::from_response(&response);
        assert_eq!(outcome, Classification::Unclassified);
        assert!(!outcome.changes_state());

        let response = LookupResponse::new().field("scheme", Value::Null);
        assert_eq!(Classification::from_response(&response), Classification::Unclassified);
    }

    #[test]
    fn test_failure() {
        let outcome = Classification::from_result(Err(LookupError::NotFound));
        assert_eq!(outcome, Classification::Failed(LookupError::NotFound));
        assert_eq!(outcome.error_message(), Some(LOOKUP_FAILED_MESSAGE));
        assert!(outcome.changes_state());
    }

    #[test]
    fn test_request_debug_is_masked() {
        let request = LookupRequest::new("4147934423469281".to_string(), 3);
        let debug = format!("{:?}", request);
        assert!(!debug.contains("4147934423469281"));
        assert!(debug.contains("9281"));
        assert!(debug.contains("generation: 3"));
    }
}
