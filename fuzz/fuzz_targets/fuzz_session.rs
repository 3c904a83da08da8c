//! Fuzz target for the entry field controller.
//!
//! Replays arbitrary event sequences and checks the controller's invariants.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_entry::format::format_card_number;
use card_entry::{
    CardBrand, CardInput, CardInputConfig, Classification, LookupError, ResolutionPolicy,
};

#[derive(Debug, Arbitrary)]
struct Session {
    threshold: u8,
    discard_stale: bool,
    actions: Vec<Action>,
}

#[derive(Debug, Arbitrary)]
enum Action {
    Type(String),
    Blur(String),
    Resolve(Option<u8>),
    Fail,
}

fn outcome(choice: Option<u8>) -> Classification {
    match choice {
        None => Classification::Empty,
        Some(n) => match n % 6 {
            0 => Classification::Recognized(CardBrand::Visa),
            1 => Classification::Recognized(CardBrand::Mastercard),
            2 => Classification::Recognized(CardBrand::Discover),
            3 => Classification::Recognized(CardBrand::Amex),
            4 => Classification::Recognized(CardBrand::Generic),
            _ => Classification::Unclassified,
        },
    }
}

fuzz_target!(|session: Session| {
    let policy = if session.discard_stale {
        ResolutionPolicy::DiscardStale
    } else {
        ResolutionPolicy::LastWriteWins
    };
    let config = CardInputConfig::new()
        .min_lookup_length(usize::from(session.threshold % 20) + 1)
        .resolution(policy);
    let mut field = match CardInput::new((), &config) {
        Ok(field) => field,
        Err(_) => return,
    };
    let mut pending = None;

    for action in session.actions {
        match action {
            Action::Type(text) => {
                if let Some(request) = field.on_input_change(&text) {
                    assert!(pending.is_none(), "Second lookup issued while one is pending");
                    pending = Some(request);
                }
            }
            Action::Blur(text) => {
                field.on_blur(&text);
            }
            Action::Resolve(choice) => {
                if let Some(request) = pending.take() {
                    pending = field.on_lookup_complete(request, outcome(choice));
                }
            }
            Action::Fail => {
                if let Some(request) = pending.take() {
                    let failed = Classification::Failed(LookupError::NotFound);
                    pending = field.on_lookup_complete(request, failed);
                }
            }
        }

        let state = field.state();
        assert_eq!(state.lookup_in_flight(), pending.is_some());
        assert_eq!(
            state.display(),
            format_card_number(state.raw_input(), state.brand())
        );
    }
});
