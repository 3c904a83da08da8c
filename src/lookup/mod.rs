//! Card scheme lookup contract.
//!
//! The entry field never decides the card network itself: it asks an external
//! BIN lookup service and reacts to whatever record comes back. This module
//! defines that contract and the record type.
//!
//! # Example
//!
//! ```
//! use card_entry::lookup::{BinLookup, LookupResponse, PrefixLookup};
//!
//! # tokio_test_block(async {
//! let lookup = PrefixLookup::standard();
//! let response = lookup.lookup("41474").await.unwrap();
//! assert_eq!(response.scheme(), Some("visa"));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
//! # }
//! ```

mod memory;

pub use memory::{PrefixLookup, MAX_RANGE_RULES};

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;

/// An external card scheme lookup service.
///
/// Implementations receive the normalized field input (at least the minimum
/// lookup length) and resolve to a record, or fail with a [`LookupError`].
/// Failures are absorbed by the controller and never reach its caller.
pub trait BinLookup {
    /// Looks up the issuer record for a (possibly partial) card number.
    fn lookup(&self, number: &str) -> impl Future<Output = Result<LookupResponse, LookupError>>;
}

impl<T: BinLookup> BinLookup for &T {
    fn lookup(&self, number: &str) -> impl Future<Output = Result<LookupResponse, LookupError>> {
        (**self).lookup(number)
    }
}

/// Adapts an async function into a [`BinLookup`].
///
/// # Example
///
/// ```
/// use card_entry::lookup::{LookupFn, LookupResponse};
/// use card_entry::error::LookupError;
///
/// let lookup = LookupFn(|number: String| async move {
///     if number.starts_with('4') {
///         Ok(LookupResponse::with_scheme("visa"))
///     } else {
///         Err(LookupError::NotFound)
///     }
/// });
/// # let _ = lookup;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LookupFn<F>(pub F);

impl<F, Fut> BinLookup for LookupFn<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<LookupResponse, LookupError>>,
{
    fn lookup(&self, number: &str) -> impl Future<Output = Result<LookupResponse, LookupError>> {
        (self.0)(number.to_string())
    }
}

/// A record returned by the lookup service.
///
/// The service answers with a JSON object. Only `scheme` is interpreted;
/// every other field is kept but ignored. An empty object means the service
/// had nothing to say about the number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResponse {
    fields: Map<String, Value>,
}

impl LookupResponse {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record carrying only a scheme.
    pub fn with_scheme(scheme: impl Into<String>) -> Self {
        let scheme: String = scheme.into();
        Self::new().field("scheme", scheme)
    }

    /// Builder method to set an arbitrary field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Parses a JSON response body.
    ///
    /// # Errors
    ///
    /// `LookupError::Malformed` when the body is not a JSON object.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::lookup::LookupResponse;
    ///
    /// let response = LookupResponse::from_json(r#"{"scheme":"amex","type":"credit"}"#).unwrap();
    /// assert_eq!(response.scheme(), Some("amex"));
    /// assert!(LookupResponse::from_json("[]").is_err());
    /// ```
    pub fn from_json(body: &str) -> Result<Self, LookupError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Returns the reported scheme.
    ///
    /// A missing, null, non-string or empty `scheme` reads as `None`.
    pub fn scheme(&self) -> Option<&str> {
        self.fields
            .get("scheme")
            .and_then(Value::as_str)
            .filter(|scheme| !scheme.is_empty())
    }

    /// Returns a raw field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns true if the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
