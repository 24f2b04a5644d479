//! Card and deck types.
//!
//! ## Key Types
//!
//! - `Rank`: tagged comparable value - `Numeric(2..=14)` or `Joker`
//! - `Suit`: the four French suits plus the two Joker colors
//! - `Card`: immutable rank + suit value with fallible comparison
//! - `Deck`: ordered draw pile with injected-RNG shuffling

pub mod card;
pub mod deck;

pub use card::{Card, InvalidComparison, Rank, Suit, MAX_RANK, MIN_RANK, STANDARD_SUITS};
pub use deck::{Deck, JOKER_COUNT, STANDARD_DECK_SIZE};
