//! Fuzz target for card formatting.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_entry::{format, normalize, CardBrand};

fuzz_target!(|data: &str| {
    let brands = [
        None,
        Some(CardBrand::Visa),
        Some(CardBrand::Mastercard),
        Some(CardBrand::Discover),
        Some(CardBrand::Amex),
        Some(CardBrand::Generic),
    ];

    for brand in brands {
        // These should never panic
        let _ = format::format_with_delimiter(data, brand, "-");
        let _ = format::split_into_groups(data, format::grouping_for_brand(brand));

        // Stripping the delimiters gives back the truncated input
        let raw = normalize::normalize(data);
        let formatted = format::format_card_number(&raw, brand);
        let expected: String = raw.chars().take(format::display_capacity(brand)).collect();
        assert_eq!(
            normalize::normalize(&formatted),
            expected,
            "Format roundtrip should preserve characters"
        );
    }
});
