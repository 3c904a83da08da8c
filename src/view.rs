//! What the rendering layer needs from the controller.
//!
//! The view is derived from the state on demand; nothing in it feeds back
//! into the controller.

use crate::state::CardInputState;
use crate::validate::ValidationStatus;
use crate::CardBrand;
use serde::Serialize;

/// Placeholder text for an empty field.
pub const PLACEHOLDER: &str = "1234 1234 1234 1234";

/// A card network logo asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Logo {
    /// Asset path.
    pub src: &'static str,
    /// Alternative text.
    pub alt: &'static str,
}

impl Logo {
    /// Returns the logo for a brand.
    pub const fn for_brand(brand: CardBrand) -> Self {
        match brand {
            CardBrand::Amex => Self { src: "/amex.svg", alt: "amex" },
            CardBrand::Discover => Self { src: "/discover.svg", alt: "disc" },
            CardBrand::Mastercard => Self { src: "/mastercard.svg", alt: "mc" },
            CardBrand::Visa => Self { src: "/visa.svg", alt: "visa" },
            CardBrand::Generic => Self { src: "/generic.svg", alt: "" },
        }
    }
}

/// The pass/fail marker shown after blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIcon {
    /// Shown for `ValidationStatus::Pass`.
    Check,
    /// Shown for `ValidationStatus::Fail`.
    Cross,
}

impl StatusIcon {
    /// Returns the icon for a status, or `None` before the first blur.
    pub const fn for_status(status: ValidationStatus) -> Option<Self> {
        match status {
            ValidationStatus::Unset => None,
            ValidationStatus::Pass => Some(Self::Check),
            ValidationStatus::Fail => Some(Self::Cross),
        }
    }

    /// Asset path.
    pub const fn src(&self) -> &'static str {
        match self {
            Self::Check => "/check.svg",
            Self::Cross => "/x.svg",
        }
    }
}

/// Derived state handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardInputView {
    /// Field value.
    pub display: String,
    /// Logo next to the field, absent while the brand is unknown.
    pub logo: Option<Logo>,
    /// Validation marker, absent before the first blur.
    pub status: Option<StatusIcon>,
    /// Feedback text under the field.
    pub error_message: Option<String>,
}

impl From<&CardInputState> for CardInputView {
    fn from(state: &CardInputState) -> Self {
        Self {
            display: state.display().to_string(),
            logo: state.brand().map(Logo::for_brand),
            status: StatusIcon::for_status(state.status()),
            error_message: state.error_message().map(str::to_string),
        }
    }
}
