//! The card input controller.
//!
//! `CardInput` owns the state of one entry field and turns field events into
//! state transitions:
//!
//! - **input**: normalize → store → reformat → maybe issue a lookup
//! - **lookup completed**: release the guard → apply the outcome → reformat
//! - **blur**: validate the field text against the current brand
//!
//! Lookups are the only asynchronous step. The controller never awaits them
//! itself in the event handlers; it hands out a [`LookupRequest`] and expects
//! it back through [`CardInput::on_lookup_complete`], so keystrokes can keep
//! arriving while a lookup is pending. At most one request is outstanding per
//! controller; input that arrives meanwhile is not looked up.
//!
//! # Example
//!
//! ```
//! use card_entry::{CardInput, CardBrand};
//! use card_entry::lookup::PrefixLookup;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut field = CardInput::with_defaults(PrefixLookup::standard());
//!
//! field.input("41474").await;
//! assert_eq!(field.state().display(), "4147 4");
//! assert_eq!(field.state().brand(), Some(CardBrand::Visa));
//! # });
//! ```

use crate::card::MIN_LOOKUP_LENGTH;
use crate::classify::{Classification, LookupRequest};
use crate::error::ConfigError;
use crate::format::{format_with_delimiter, DEFAULT_DELIMITER};
use crate::lookup::{BinLookup, PrefixLookup};
use crate::mask::mask_partial;
use crate::normalize::{Separator, DEFAULT_SEPARATOR};
use crate::state::{CardInputState, Event};
use crate::validate::{ValidationStatus, Validator};
use crate::view::CardInputView;

/// How a lookup result is applied when the input changed while it was pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionPolicy {
    /// Apply every result to whatever the input is by then.
    ///
    /// A slow lookup for an older prefix can set the brand for newer input.
    #[default]
    LastWriteWins,
    /// Ignore results issued for an older input and look up the current one.
    DiscardStale,
}

/// Construction options for [`CardInput`].
///
/// # Example
///
/// ```
/// use card_entry::{CardInputConfig, ResolutionPolicy};
///
/// let config = CardInputConfig::new()
///     .separator("[-\\s]")
///     .delimiter("-")
///     .resolution(ResolutionPolicy::DiscardStale);
/// assert_eq!(config.separator_pattern(), "[-\\s]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInputConfig {
    separator: String,
    delimiter: String,
    min_lookup_length: usize,
    resolution: ResolutionPolicy,
}

impl CardInputConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the separator pattern (a regex fragment).
    pub fn separator(mut self, pattern: impl Into<String>) -> Self {
        self.separator = pattern.into();
        self
    }

    /// Builder method to set the text inserted between groups.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Builder method to set how many characters trigger a lookup.
    pub fn min_lookup_length(mut self, length: usize) -> Self {
        self.min_lookup_length = length;
        self
    }

    /// Builder method to set the resolution policy.
    pub fn resolution(mut self, policy: ResolutionPolicy) -> Self {
        self.resolution = policy;
        self
    }

    /// Returns the configured separator pattern.
    pub fn separator_pattern(&self) -> &str {
        &self.separator
    }

    fn compile(&self) -> Result<Rules, ConfigError> {
        if self.min_lookup_length == 0 {
            return Err(ConfigError::ZeroLookupLength);
        }

        let separator = Separator::new(&self.separator)?;
        if !separator.strips(&self.delimiter) {
            return Err(ConfigError::DelimiterNotStripped {
                delimiter: self.delimiter.clone(),
                pattern: self.separator.clone(),
            });
        }
        let validator = Validator::new(&separator)?;

        Ok(Rules {
            separator,
            validator,
            delimiter: self.delimiter.clone(),
            min_lookup_length: self.min_lookup_length,
            resolution: self.resolution,
        })
    }
}

impl Default for CardInputConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            min_lookup_length: MIN_LOOKUP_LENGTH,
            resolution: ResolutionPolicy::default(),
        }
    }
}

/// Compiled configuration.
#[derive(Debug, Clone)]
struct Rules {
    separator: Separator,
    validator: Validator,
    delimiter: String,
    min_lookup_length: usize,
    resolution: ResolutionPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            validator: Validator::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            min_lookup_length: MIN_LOOKUP_LENGTH,
            resolution: ResolutionPolicy::default(),
        }
    }
}

/// Controller for one card number entry field.
///
/// Each instance owns its state and its in-flight guard; instances share
/// nothing.
#[derive(Debug)]
pub struct CardInput<L = PrefixLookup> {
    lookup: L,
    rules: Rules,
    state: CardInputState,
}

impl<L> CardInput<L> {
    /// Creates a controller.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not compile.
    pub fn new(lookup: L, config: &CardInputConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            lookup,
            rules: config.compile()?,
            state: CardInputState::new(),
        })
    }

    /// Creates a controller with the default configuration.
    pub fn with_defaults(lookup: L) -> Self {
        Self {
            lookup,
            rules: Rules::default(),
            state: CardInputState::new(),
        }
    }

    /// Creates a controller for a pre-filled field.
    ///
    /// The initial value is processed like a first keystroke; the returned
    /// request, if any, is its lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not compile.
    pub fn with_initial_input(
        lookup: L,
        config: &CardInputConfig,
        initial: &str,
    ) -> Result<(Self, Option<LookupRequest>), ConfigError> {
        let mut input = Self::new(lookup, config)?;
        let request = if initial.is_empty() {
            None
        } else {
            input.on_input_change(initial)
        };
        Ok((input, request))
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> &CardInputState {
        &self.state
    }

    /// Returns the lookup service.
    #[inline]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Derives the view for the rendering layer.
    pub fn view(&self) -> CardInputView {
        CardInputView::from(&self.state)
    }

    /// Routes an event to its handler.
    ///
    /// Returns the lookup to run next, if the event issued one.
    pub fn dispatch(&mut self, event: Event) -> Option<LookupRequest> {
        match event {
            Event::InputChanged(text) => self.on_input_change(&text),
            Event::Blurred(text) => {
                self.on_blur(&text);
                None
            }
            Event::LookupCompleted(request, outcome) => self.on_lookup_complete(request, outcome),
        }
    }

    /// Handles a change of the field text.
    ///
    /// Returns a lookup request if one should be issued for the new input.
    pub fn on_input_change(&mut self, text: &str) -> Option<LookupRequest> {
        let raw = self.rules.separator.normalize(text);
        tracing::debug!(
            input = %mask_partial(&raw),
            length = raw.chars().count(),
            "normalized input"
        );

        let changed = self.state.replace_input(raw);
        self.reformat();
        if !changed {
            return None;
        }
        self.request_lookup()
    }

    /// Handles focus loss. Validates `text` against the current brand.
    pub fn on_blur(&mut self, text: &str) -> ValidationStatus {
        let status = self.rules.validator.validate(text, self.state.brand());
        self.state.set_status(status);
        status
    }

    /// Applies the outcome of a lookup issued by this controller.
    ///
    /// Always releases the in-flight guard. Under
    /// [`ResolutionPolicy::DiscardStale`] a result for outdated input is
    /// dropped and a request for the current input may be returned.
    pub fn on_lookup_complete(
        &mut self,
        request: LookupRequest,
        outcome: Classification,
    ) -> Option<LookupRequest> {
        self.state.end_lookup();

        let stale = request.generation() != self.state.generation();
        if stale && self.rules.resolution == ResolutionPolicy::DiscardStale {
            tracing::debug!(
                issued = request.generation(),
                current = self.state.generation(),
                "discarding stale lookup result"
            );
            return self.request_lookup();
        }

        if self.state.apply_classification(&outcome) {
            tracing::debug!(brand = ?self.state.brand(), stale, "brand changed");
        }
        self.reformat();
        None
    }

    /// Recomputes the display from the input and brand.
    fn reformat(&mut self) -> bool {
        let formatted = format_with_delimiter(
            self.state.raw_input(),
            self.state.brand(),
            &self.rules.delimiter,
        );
        let changed = self.state.set_display(formatted);
        if changed {
            tracing::debug!(display = %mask_partial(self.state.display()), "reformatted");
        }
        changed
    }

    /// Decides whether the current input gets looked up.
    fn request_lookup(&mut self) -> Option<LookupRequest> {
        if self.state.input_len() < self.rules.min_lookup_length {
            if self.state.clear_classification() {
                tracing::debug!("input too short, cleared brand and message");
                self.reformat();
            }
            return None;
        }

        if !self.state.begin_lookup() {
            tracing::debug!("lookup in progress, skipping");
            return None;
        }

        Some(LookupRequest::new(
            self.state.raw_input().to_string(),
            self.state.generation(),
        ))
    }
}

impl<L: BinLookup> CardInput<L> {
    /// Creates a controller for a pre-filled field and processes its value.
    pub async fn mount(lookup: L, config: &CardInputConfig, initial: &str) -> Result<Self, ConfigError> {
        let (mut input, request) = Self::with_initial_input(lookup, config, initial)?;
        input.drive(request).await;
        Ok(input)
    }

    /// Handles a change of the field text and runs any resulting lookup to
    /// completion.
    pub async fn input(&mut self, text: &str) -> &CardInputState {
        let request = self.on_input_change(text);
        self.drive(request).await;
        &self.state
    }

    /// Runs a lookup and applies its outcome, following up as long as the
    /// controller asks for more.
    pub async fn drive(&mut self, mut request: Option<LookupRequest>) {
        while let Some(current) = request {
            let outcome = current.resolve(&self.lookup).await;
            request = self.on_lookup_complete(current, outcome);
        }
    }
}
