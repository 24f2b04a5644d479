//! Game engine: the guess/bank/draw state machine and scoring rules.
//!
//! ## Key Types
//!
//! - `GameSession`: one game, driven by synchronous caller operations
//! - `EngineConfig`: lives and scoring constants
//! - `Phase`: where the session sits between calls
//! - `Guess` / `DrawOutcome`: the caller-facing round protocol
//! - `EngineError`: contract violations and terminal-state rejections

pub mod config;
pub mod session;

pub use config::EngineConfig;
pub use session::{DrawOutcome, EngineError, GameSession, Guess, Phase, RULES_TEXT};
