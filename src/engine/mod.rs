//! Deck engine: filtering, presentation and the deck state machine.
//!
//! - [`filter`]: Criteria matching, validation and deck construction
//! - [`presentation`]: Theme, direction and jitter attached to each card
//! - [`deck`]: Remaining/history/liked collections and their transitions

pub mod deck;
pub mod filter;
pub mod presentation;

pub use deck::{DeckCard, DeckState, DeckStatus, DecidedCandidate, DEFAULT_UNDO_COOLDOWN};
pub use filter::{build_deck, build_deck_with_rng, matches, select};
pub use presentation::{present, pseudo_random, PresentedCandidate};
