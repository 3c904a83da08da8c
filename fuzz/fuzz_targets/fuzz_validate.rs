//! Fuzz target for blur validation.
//!
//! Tests that validation and normalization never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_entry::normalize::{normalize, Separator};
use card_entry::validate::Validator;
use card_entry::{CardBrand, ValidationStatus};

fuzz_target!(|data: &str| {
    let validator = Validator::default();
    for brand in [None, Some(CardBrand::Visa), Some(CardBrand::Amex)] {
        assert_ne!(validator.validate(data, brand), ValidationStatus::Unset);
    }

    let once = normalize(data);
    assert_eq!(normalize(&once), once, "Normalization should be idempotent");

    // Arbitrary separator patterns must be rejected, not panic
    if let Ok(separator) = Separator::new(data) {
        let _ = Validator::new(&separator);
        let _ = separator.normalize("4147 9344-2346");
    }
});
