//! Persistent ranked leaderboard.
//!
//! ## Key Types
//!
//! - `Leaderboard`: append-only JSON-lines store with ranked reads
//! - `ScoreEntry`: `(date, name, score)` record returned by reads
//! - `StoreError`: closed-handle, I/O, and corruption failures

pub mod store;

pub use store::{Leaderboard, ScoreEntry, StoreError, DEFAULT_DISPLAY_LIMIT};
