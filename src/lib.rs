//! # card_entry
//!
//! The logic behind a credit card number entry field, independent of any UI
//! framework.
//!
//! ## Features
//!
//! - Separator stripping with a configurable pattern
//! - Card network lookup through a pluggable async service, one request at a time
//! - Brand-aware grouping while the user types (`4147 9344`, `3471 234567 89012`)
//! - Structural validation on blur
//! - Multiple interfaces: library, CLI, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use card_entry::{CardInput, CardBrand, ValidationStatus};
//! use card_entry::lookup::PrefixLookup;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut field = CardInput::with_defaults(PrefixLookup::standard());
//!
//! // Every change is normalized, regrouped and, from 4 characters on, looked up
//! field.input("41479344").await;
//! assert_eq!(field.state().display(), "4147 9344");
//! assert_eq!(field.state().brand(), Some(CardBrand::Visa));
//!
//! // Validation happens when the field loses focus
//! assert_eq!(field.on_blur("4147 9344"), ValidationStatus::Fail);
//! # });
//! ```
//!
//! ## Driving Lookups Yourself
//!
//! The event handlers are synchronous. A handler that wants a lookup returns a
//! [`LookupRequest`]; run it whenever suits your event loop and hand the
//! outcome back. Input arriving in the meantime is formatted immediately but
//! not looked up.
//!
//! ```rust
//! use card_entry::{CardInput, CardBrand};
//! use card_entry::classify::Classification;
//!
//! let mut field = CardInput::with_defaults(());
//!
//! let request = field.on_input_change("3471").unwrap();
//! assert!(field.state().lookup_in_flight());
//! assert!(field.on_input_change("34712345678").is_none());
//!
//! field.on_lookup_complete(request, Classification::Recognized(CardBrand::Amex));
//! assert_eq!(field.state().display(), "3471 234567 8");
//! ```
//!
//! ## Groupings
//!
//! | Brand | Groups | Complete |
//! |-------|--------|----------|
//! | American Express | 4-6-5 | 15 digits |
//! | Visa, Mastercard, Discover, other, unknown | 4-4-4-4 | 16 digits |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | Command-line tool |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Field contents are zeroized when the state or a request is dropped
//! - `Debug` output and log events show masked input only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod classify;
pub mod controller;
pub mod error;
pub mod format;
pub mod lookup;
pub mod mask;
pub mod normalize;
pub mod state;
pub mod validate;
pub mod view;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{CardBrand, MIN_LOOKUP_LENGTH};
pub use classify::{Classification, LookupRequest, LOOKUP_FAILED_MESSAGE};
pub use controller::{CardInput, CardInputConfig, ResolutionPolicy};
pub use error::{ConfigError, LookupError};
pub use lookup::{BinLookup, LookupResponse};
pub use state::{CardInputState, Event};
pub use validate::ValidationStatus;
pub use view::CardInputView;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::PrefixLookup;

    #[tokio::test]
    async fn test_visa_prefix() {
        let mut field = CardInput::with_defaults(PrefixLookup::standard());
        field.input("41474").await;
        assert_eq!(field.state().display(), "4147 4");
        assert_eq!(field.state().brand(), Some(CardBrand::Visa));
        assert_eq!(field.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_full_visa_passes() {
        let mut field = CardInput::with_defaults(PrefixLookup::standard());
        field.input("4147934423469281").await;
        assert_eq!(field.state().display(), "4147 9344 2346 9281");
        assert_eq!(field.on_blur("4147 9344 2346 9281"), ValidationStatus::Pass);
    }

    #[tokio::test]
    async fn test_amex() {
        let mut field = CardInput::with_defaults(PrefixLookup::standard());
        field.input("347123456789012").await;
        assert_eq!(field.state().display(), "3471 234567 89012");
        assert_eq!(field.on_blur("3471 234567 89012"), ValidationStatus::Pass);

        let view = field.view();
        assert_eq!(view.logo.map(|l| l.src), Some("/amex.svg"));
    }

    #[tokio::test]
    async fn test_unknown_issuer_shows_message() {
        let mut field = CardInput::with_defaults(PrefixLookup::standard());
        field.input("abc56789012").await;
        assert_eq!(field.state().display(), "abc5 6789 012");
        assert_eq!(field.state().brand(), None);
        assert_eq!(field.state().error_message(), Some(LOOKUP_FAILED_MESSAGE));
        assert_eq!(field.on_blur("abc5 6789 012"), ValidationStatus::Fail);
    }

    #[test]
    fn test_thread_safety() {
        // Ensure types are Send + Sync
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardInput<PrefixLookup>>();
        assert_send_sync::<CardInputState>();
        assert_send_sync::<LookupRequest>();
        assert_send_sync::<ConfigError>();
    }
}
