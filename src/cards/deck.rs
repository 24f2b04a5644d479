//! Deck construction, shuffling, and drawing.
//!
//! A deck is built in deterministic suit-major, rank-minor order so tests
//! can reason about the unshuffled sequence, then shuffled through an
//! injected [`GameRng`]. Cards are drawn from the top (the back of the
//! underlying vector) until the deck is exhausted.
//!
//! Jokers are appended only when explicitly requested; the engine asks for
//! them once, in the deck that starts a game, and never in replacements.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::{Card, MAX_RANK, MIN_RANK, STANDARD_SUITS};
use crate::core::GameRng;

/// Cards in a standard deck, before any Jokers.
pub const STANDARD_DECK_SIZE: usize = 52;
/// Jokers added by [`Deck::build`] when requested: one red, one black.
pub const JOKER_COUNT: usize = 2;

/// An ordered pile of cards consumed by drawing from the top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build an unshuffled deck: all 52 rank-suit combinations in
    /// suit-major, rank-minor order, plus the red and black Jokers when
    /// `include_jokers` is set.
    #[must_use]
    pub fn build(include_jokers: bool) -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE + JOKER_COUNT);
        for suit in STANDARD_SUITS {
            for ordinal in MIN_RANK..=MAX_RANK {
                cards.push(Card::standard(ordinal, suit));
            }
        }
        if include_jokers {
            cards.push(Card::joker(true));
            cards.push(Card::joker(false));
        }
        Self { cards }
    }

    /// Shuffle the deck in place with a uniform permutation.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the top card, or `None` when the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck out of cards?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cards.last() {
            Some(top) => write!(f, "Deck({} cards, top card: {top})", self.cards.len()),
            None => write!(f, "Deck(empty)"),
        }
    }
}
