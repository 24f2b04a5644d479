//! Engine configuration.
//!
//! The scoring and lives constants are configured at session start rather
//! than hardcoded in the state machine. `Default` carries the standard
//! game: 3 lives, 2 points per correct guess plus 2 per streak step.

use serde::{Deserialize, Serialize};

/// Tunable constants for a game session.
///
/// Points for a correct guess at streak `s` are
/// `base_score + s * streak_multiplier`, computed before the streak
/// advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lives at session start; the game ends when they reach zero.
    pub starting_lives: u32,
    /// Flat points for any correct guess.
    pub base_score: u32,
    /// Extra points per consecutive correct guess already made.
    pub streak_multiplier: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            base_score: 2,
            streak_multiplier: 2,
        }
    }
}

impl EngineConfig {
    /// Points awarded for a correct guess at the given streak.
    #[must_use]
    pub const fn points_for_streak(&self, streak: u32) -> u32 {
        self.base_score + streak * self.streak_multiplier
    }
}
