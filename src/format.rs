//! Card number formatting for the entry field.
//!
//! The display string is derived from the normalized input and the active
//! brand through a grouping table, and is recomputed whenever either changes.
//!
//! # Format Conventions
//!
//! - **American Express**: `XXXX XXXXXX XXXXX`
//! - **Everything else** (including unknown brands): `XXXX XXXX XXXX XXXX`
//!
//! Input is grouped by characters, not digits: a partially typed or
//! malformed value still displays the way it was entered. Characters past
//! the end of the grouping table are not displayed.
//!
//! # Example
//!
//! ```
//! use card_entry::format::format_card_number;
//! use card_entry::CardBrand;
//!
//! assert_eq!(format_card_number("41474", Some(CardBrand::Visa)), "4147 4");
//! assert_eq!(format_card_number("347123456789012", Some(CardBrand::Amex)), "3471 234567 89012");
//! assert_eq!(format_card_number("abc56789012", None), "abc5 6789 012");
//! ```

use crate::CardBrand;

/// Group sizes used by every brand without its own layout.
pub const STANDARD_GROUPS: [usize; 4] = [4, 4, 4, 4];

/// Group sizes for American Express.
pub const AMEX_GROUPS: [usize; 3] = [4, 6, 5];

/// Default text inserted between groups.
pub const DEFAULT_DELIMITER: &str = " ";

/// Returns the digit grouping pattern for a card brand.
#[inline]
pub fn grouping_for_brand(brand: Option<CardBrand>) -> &'static [usize] {
    match brand {
        Some(CardBrand::Amex) => &AMEX_GROUPS,
        _ => &STANDARD_GROUPS,
    }
}

/// Returns how many characters the brand's grouping can display.
#[inline]
pub fn display_capacity(brand: Option<CardBrand>) -> usize {
    grouping_for_brand(brand).iter().sum()
}

/// Partitions `input` left to right into chunks of the given sizes.
///
/// Stops as soon as the input is exhausted, so trailing chunks may be short
/// or absent. Never returns empty chunks.
///
/// # Example
///
/// ```
/// use card_entry::format::{split_into_groups, AMEX_GROUPS};
///
/// assert_eq!(split_into_groups("3471234567", &AMEX_GROUPS), vec!["3471", "234567"]);
/// assert_eq!(split_into_groups("34712", &AMEX_GROUPS), vec!["3471", "2"]);
/// ```
pub fn split_into_groups<'a>(input: &'a str, group_sizes: &[usize]) -> Vec<&'a str> {
    let mut groups = Vec::with_capacity(group_sizes.len());
    let mut rest = input;

    for &size in group_sizes {
        if rest.is_empty() {
            break;
        }
        let end = rest
            .char_indices()
            .nth(size)
            .map_or(rest.len(), |(pos, _)| pos);
        let (group, tail) = rest.split_at(end);
        if !group.is_empty() {
            groups.push(group);
        }
        rest = tail;
    }

    groups
}

/// Formats normalized input for a brand, separating groups with a space.
pub fn format_card_number(input: &str, brand: Option<CardBrand>) -> String {
    format_with_delimiter(input, brand, DEFAULT_DELIMITER)
}

/// Formats normalized input for a brand with a custom group delimiter.
///
/// # Example
///
/// ```
/// use card_entry::format::format_with_delimiter;
///
/// assert_eq!(format_with_delimiter("41479344", None, "-"), "4147-9344");
/// ```
pub fn format_with_delimiter(input: &str, brand: Option<CardBrand>, delimiter: &str) -> String {
    split_into_groups(input, grouping_for_brand(brand)).join(delimiter)
}
