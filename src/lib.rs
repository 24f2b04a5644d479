//! # higher-lower
//!
//! Core engine for a turn-based higher-or-lower card-guessing game with a
//! persistent ranked leaderboard.
//!
//! ## Design Principles
//!
//! 1. **Explicit sessions**: A game is a [`GameSession`] value the caller
//!    constructs and drives. No hidden globals, no blocking calls -
//!    "waiting for the player" is a named phase between calls.
//!
//! 2. **Typed edges**: Malformed guesses and Joker comparisons are
//!    errors, never sentinel booleans. Retry conditions (empty deck,
//!    Joker draw) are ordinary return variants, never errors.
//!
//! 3. **Injected randomness**: Every shuffle goes through a seedable
//!    [`GameRng`], so fairness and reproducibility are testable.
//!
//! ## Architecture
//!
//! A caller (CLI or GUI shell) drives the engine with draw/guess/bank
//! calls in response to user actions and renders the resulting state; on
//! termination it pushes the banked score into the [`Leaderboard`] and
//! reads back the rank and top-N listing. Rendering, input parsing, and
//! timing live entirely in the shell.
//!
//! ## Modules
//!
//! - `core`: deterministic RNG
//! - `cards`: card values, ranks, decks
//! - `engine`: the game state machine and scoring
//! - `leaderboard`: durable ranked score store

pub mod cards;
pub mod core;
pub mod engine;
pub mod leaderboard;

// Re-export commonly used types
pub use crate::cards::{Card, Deck, InvalidComparison, Rank, Suit};
pub use crate::core::GameRng;
pub use crate::engine::{
    DrawOutcome, EngineConfig, EngineError, GameSession, Guess, Phase, RULES_TEXT,
};
pub use crate::leaderboard::{Leaderboard, ScoreEntry, StoreError, DEFAULT_DISPLAY_LIMIT};
