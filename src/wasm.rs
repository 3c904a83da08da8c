//! WebAssembly bindings for the entry field controller.
//!
//! The lookup runs on the JavaScript side: `input` hands back the number to
//! look up (or `undefined`), and the page reports the answer with
//! `lookupResolved` or `lookupFailed`. Those may hand back another number
//! when the controller wants a follow-up lookup.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { CardEntry } from 'card_entry';
//!
//! await init();
//!
//! const entry = new CardEntry();
//!
//! async function onChange(event) {
//!     let number = entry.input(event.target.value);
//!     event.target.value = entry.display;
//!     while (number !== undefined) {
//!         try {
//!             const response = await fetch(`https://lookup.binlist.net/${number}`);
//!             number = entry.lookupResolved(await response.text());
//!         } catch (err) {
//!             number = entry.lookupFailed(String(err));
//!         }
//!         event.target.value = entry.display;
//!     }
//! }
//!
//! function onBlur(event) {
//!     entry.blur(event.target.value);
//!     statusIcon.src = entry.statusIcon ?? "";
//! }
//! ```

#![cfg(feature = "wasm")]

use crate::classify::{Classification, LookupRequest};
use crate::controller::{CardInput, CardInputConfig};
use crate::error::LookupError;
use crate::lookup::LookupResponse;
use crate::view::{Logo, StatusIcon};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// A card number entry field controller, exposed to JavaScript.
#[wasm_bindgen]
pub struct CardEntry {
    inner: CardInput<()>,
    pending: Option<LookupRequest>,
}

#[wasm_bindgen]
impl CardEntry {
    /// Creates a controller. `separator` is a regex fragment, whitespace by default.
    #[wasm_bindgen(constructor)]
    pub fn new(separator: Option<String>) -> Result<CardEntry, JsValue> {
        let mut config = CardInputConfig::new();
        if let Some(pattern) = separator {
            config = config.separator(pattern);
        }
        let inner = CardInput::new((), &config).map_err(to_js_error)?;
        Ok(CardEntry {
            inner,
            pending: None,
        })
    }

    /// Handles a change of the field text. Returns the number to look up, if any.
    pub fn input(&mut self, text: &str) -> Option<String> {
        let request = self.inner.on_input_change(text);
        self.hold(request)
    }

    /// Handles focus loss. Returns true if the value is complete.
    pub fn blur(&mut self, text: &str) -> bool {
        self.inner.on_blur(text).is_pass()
    }

    /// Reports the JSON body returned by the lookup service.
    #[wasm_bindgen(js_name = lookupResolved)]
    pub fn lookup_resolved(&mut self, body: &str) -> Option<String> {
        let outcome = Classification::from_result(LookupResponse::from_json(body));
        self.complete(outcome)
    }

    /// Reports that the lookup could not be performed.
    #[wasm_bindgen(js_name = lookupFailed)]
    pub fn lookup_failed(&mut self, message: &str) -> Option<String> {
        self.complete(Classification::Failed(LookupError::Service(message.to_string())))
    }

    /// The formatted field value.
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.state().display().to_string()
    }

    /// The brand scheme (`visa`, `amex`, ..., `generic`), or an empty string.
    #[wasm_bindgen(getter)]
    pub fn brand(&self) -> String {
        self.inner
            .state()
            .brand()
            .map(|brand| brand.scheme().to_string())
            .unwrap_or_default()
    }

    /// Path of the brand logo, if the brand is known.
    #[wasm_bindgen(getter)]
    pub fn logo(&self) -> Option<String> {
        self.inner
            .state()
            .brand()
            .map(|brand| Logo::for_brand(brand).src.to_string())
    }

    /// `Pass`, `Fail`, or an empty string before the first blur.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.inner.state().status().label().to_string()
    }

    /// Path of the status icon, if the field has been blurred.
    #[wasm_bindgen(getter, js_name = statusIcon)]
    pub fn status_icon(&self) -> Option<String> {
        StatusIcon::for_status(self.inner.state().status()).map(|icon| icon.src().to_string())
    }

    /// The feedback message, if any.
    #[wasm_bindgen(getter, js_name = errorMessage)]
    pub fn error_message(&self) -> Option<String> {
        self.inner.state().error_message().map(str::to_string)
    }

    /// True while a lookup is outstanding.
    #[wasm_bindgen(getter, js_name = lookupInFlight)]
    pub fn lookup_in_flight(&self) -> bool {
        self.inner.state().lookup_in_flight()
    }
}

impl CardEntry {
    fn hold(&mut self, request: Option<LookupRequest>) -> Option<String> {
        let number = request.as_ref().map(|r| r.number().to_string());
        if request.is_some() {
            self.pending = request;
        }
        number
    }

    fn complete(&mut self, outcome: Classification) -> Option<String> {
        let request = self.pending.take()?;
        let follow_up = self.inner.on_lookup_complete(request, outcome);
        self.hold(follow_up)
    }
}
