//! Masking of in-progress card input for logs and debug output.
//!
//! The field holds whatever the user has typed so far, so masking works on
//! arbitrary characters rather than validated digits. Never log the raw input.

/// Masks everything except the last four characters.
///
/// Inputs of four characters or fewer are fully masked, since they are all
/// that is known about the number.
///
/// # Example
///
/// ```
/// use card_entry::mask::mask_partial;
///
/// assert_eq!(mask_partial("4147934423469281"), "************9281");
/// assert_eq!(mask_partial("41474"), "*1474");
/// assert_eq!(mask_partial("4147"), "****");
/// ```
pub fn mask_partial(input: &str) -> String {
    let len = input.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }

    let mut result = String::with_capacity(input.len());
    for (i, c) in input.chars().enumerate() {
        if i < len - 4 {
            result.push('*');
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_partial() {
        assert_eq!(mask_partial("4111111111111111"), "************1111");
        assert_eq!(mask_partial("abc56789012"), "*******9012");
        assert_eq!(mask_partial("41"), "**");
        assert_eq!(mask_partial(""), "");
    }

    #[test]
    fn test_mask_partial_multibyte() {
        assert_eq!(mask_partial("éééééé"), "**éééé");
    }
}
