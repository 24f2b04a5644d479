//! The higher-or-lower game state machine.
//!
//! ## Phases
//!
//! ```text
//! AwaitingFirstCard -> AwaitingGuess -> AwaitingResolution
//!                           ^                  |
//!                           +--- correct ------+
//!                                incorrect ----+--> GameOver (terminal)
//! ```
//!
//! A [`GameSession`] is an explicit value: callers construct one per game
//! and drive it with synchronous calls in response to user actions. There
//! is no hidden process-wide instance and no operation ever blocks -
//! "waiting for the player" is the session idling in a named phase.
//!
//! ## Draw protocol
//!
//! [`GameSession::draw_card`] can return two documented retry signals
//! instead of a card: the deck ran out and was replaced (Joker-free), or
//! a Joker was consumed for a bonus life. Both mean "call again"; neither
//! is an error.
//!
//! ## Terminal state
//!
//! Once lives reach zero the session is over for good: draw, guess
//! checking, banking, and resolution all fail with
//! [`EngineError::GameAlreadyOver`]. Start a new session to play again.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::config::EngineConfig;
use crate::cards::{Card, Deck, InvalidComparison, Suit};
use crate::core::GameRng;
use crate::leaderboard::{Leaderboard, StoreError};

/// Human-readable rules blurb for rendering shells.
pub const RULES_TEXT: &str = "\
Welcome to the Higher or Lower Game!

Rules:
1. You start with 3 lives.
2. Your goal is to accumulate as high a score as possible.
3. A card will be drawn, and you must guess if the next card will be
   HIGHER or LOWER, or BANK your unbanked points first.
   - Ties do not count.
4. If your guess is correct:
   - You earn points: 2 + streak * 2.
   - Your streak increments, earning you more for each correct guess.
5. If your guess is incorrect:
   - You lose a life.
   - All unbanked points are lost.
   - Your streak resets to 0.
6. If you draw a Joker you gain 1 extra life as a bonus!
7. The deck starts shuffled. If all cards are drawn, a fresh deck
   (without Jokers) replaces it automatically.
8. The game ends when you lose all your lives.

Good luck and enjoy the game!";

/// Where the session sits between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No reference card yet; draw one.
    AwaitingFirstCard,
    /// A reference card is up; collect a guess, then draw.
    AwaitingGuess,
    /// Both cards are up; resolve the guess.
    AwaitingResolution,
    /// Lives hit zero or the game was ended. Terminal.
    GameOver,
}

/// Player's prediction for the next card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guess {
    Higher,
    Lower,
}

impl FromStr for Guess {
    type Err = EngineError;

    /// Accepts `h`/`higher` and `l`/`lower`, case-insensitive. Anything
    /// else is an [`EngineError::InvalidGuess`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "higher" => Ok(Self::Higher),
            "l" | "lower" => Ok(Self::Lower),
            _ => Err(EngineError::InvalidGuess(s.to_owned())),
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Higher => write!(f, "higher"),
            Self::Lower => write!(f, "lower"),
        }
    }
}

/// Result of a draw attempt.
///
/// `DeckReplenished` and `BonusLife` are retry signals: the caller draws
/// again until a playable `Card` comes up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// A playable card; it is now the session's active comparison card.
    Card(Card),
    /// The deck was empty and has been replaced with a fresh shuffled
    /// deck without Jokers. No card yet - draw again.
    DeckReplenished,
    /// A Joker was consumed: one permanent extra life. Draw again.
    BonusLife(Suit),
}

/// Engine contract violations and terminal-state rejections.
#[derive(Debug)]
pub enum EngineError {
    /// A guess direction outside `h`/`higher`/`l`/`lower`.
    InvalidGuess(String),
    /// A Joker was passed to a rank comparison.
    InvalidComparison,
    /// The session already reached `GameOver`.
    GameAlreadyOver,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGuess(s) => write!(f, "invalid guess value: {s:?}"),
            Self::InvalidComparison => write!(f, "{}", InvalidComparison),
            Self::GameAlreadyOver => write!(f, "the game is already over"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<InvalidComparison> for EngineError {
    fn from(_: InvalidComparison) -> Self {
        Self::InvalidComparison
    }
}

/// A single game of higher-or-lower.
///
/// Owns the deck, the lives/score/streak counters, and the phase. Every
/// operation is a synchronous state transition; contract violations
/// leave the session untouched.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: EngineConfig,
    rng: GameRng,
    deck: Deck,
    previous_card: Option<Card>,
    current_card: Option<Card>,
    lives: u32,
    score: u32,
    unbanked_points: u32,
    streak: u32,
    phase: Phase,
}

impl GameSession {
    /// Start a game with the standard configuration and the given RNG
    /// seed. The starting deck includes the two Jokers.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(EngineConfig::default(), seed)
    }

    /// Start a game with explicit configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig, seed: u64) -> Self {
        Self::start(config, GameRng::new(seed))
    }

    /// Start a game with the standard configuration and an
    /// entropy-seeded RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::start(EngineConfig::default(), GameRng::from_entropy())
    }

    fn start(config: EngineConfig, mut rng: GameRng) -> Self {
        assert!(config.starting_lives > 0, "must start with at least 1 life");

        // Jokers are a one-time bonus: only the starting deck has them.
        let mut deck = Deck::build(true);
        deck.shuffle(&mut rng);
        debug!("session started with seed {}", rng.seed());

        Self {
            config,
            rng,
            deck,
            previous_card: None,
            current_card: None,
            lives: config.starting_lives,
            score: 0,
            unbanked_points: 0,
            streak: 0,
            phase: Phase::AwaitingFirstCard,
        }
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.phase == Phase::GameOver {
            Err(EngineError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }

    /// Draw the next card.
    ///
    /// An empty deck is replaced with a fresh Joker-free shuffled deck
    /// and reported as [`DrawOutcome::DeckReplenished`]; a drawn Joker
    /// grants a permanent extra life and is reported as
    /// [`DrawOutcome::BonusLife`]. Both ask the caller to draw again.
    /// A playable card becomes the active comparison card.
    pub fn draw_card(&mut self) -> Result<DrawOutcome, EngineError> {
        self.ensure_active()?;

        match self.deck.draw() {
            None => {
                let mut deck = Deck::build(false);
                deck.shuffle(&mut self.rng);
                self.deck = deck;
                Ok(DrawOutcome::DeckReplenished)
            }
            Some(card) if card.is_joker() => {
                self.lives += 1;
                debug!("joker drawn, lives now {}", self.lives);
                Ok(DrawOutcome::BonusLife(card.suit))
            }
            Some(card) => {
                self.previous_card = self.current_card;
                self.current_card = Some(card);
                self.phase = match self.phase {
                    Phase::AwaitingFirstCard => Phase::AwaitingGuess,
                    _ => Phase::AwaitingResolution,
                };
                Ok(DrawOutcome::Card(card))
            }
        }
    }

    /// Did `next` strictly beat `previous` in the guessed direction?
    ///
    /// Ties lose: equal ranks are `false` for both directions, there is
    /// no push or redraw. Pure - session state is never touched. Fails
    /// with [`EngineError::InvalidComparison`] if either card is a Joker.
    pub fn check_guess(
        &self,
        previous: Card,
        next: Card,
        guess: Guess,
    ) -> Result<bool, EngineError> {
        self.ensure_active()?;
        let ordering = next.compare(previous)?;
        Ok(match guess {
            Guess::Higher => ordering == Ordering::Greater,
            Guess::Lower => ordering == Ordering::Less,
        })
    }

    /// Record a correct guess: award `base_score + streak *
    /// streak_multiplier` unbanked points (computed before the streak
    /// advances), then increment the streak. Returns the points awarded.
    pub fn resolve_correct(&mut self) -> Result<u32, EngineError> {
        self.ensure_active()?;

        let points = self.config.points_for_streak(self.streak);
        self.unbanked_points += points;
        self.streak += 1;
        if self.phase == Phase::AwaitingResolution {
            self.phase = Phase::AwaitingGuess;
        }
        Ok(points)
    }

    /// Record an incorrect guess: forfeit all unbanked points, reset the
    /// streak, and lose one life. Returns the points lost. At zero lives
    /// the session enters terminal [`Phase::GameOver`].
    pub fn resolve_incorrect(&mut self) -> Result<u32, EngineError> {
        self.ensure_active()?;

        let lost = self.unbanked_points;
        self.unbanked_points = 0;
        self.streak = 0;
        self.lives -= 1;
        if self.lives == 0 {
            self.phase = Phase::GameOver;
            debug!("out of lives, game over");
        } else if self.phase == Phase::AwaitingResolution {
            self.phase = Phase::AwaitingGuess;
        }
        Ok(lost)
    }

    /// Move all unbanked points into the permanent score. Returns the
    /// amount banked. Banking zero points still clears the streak -
    /// banking always ends the current run.
    pub fn bank_points(&mut self) -> Result<u32, EngineError> {
        self.ensure_active()?;

        let banked = self.unbanked_points;
        self.score += banked;
        self.unbanked_points = 0;
        self.streak = 0;
        Ok(banked)
    }

    /// Finish the game: submit the banked score (unbanked points are
    /// forfeited) to the leaderboard under `name` and enter
    /// [`Phase::GameOver`]. Returns `(final_score, rank)`.
    ///
    /// Callable from any phase, including after lives ran out.
    pub fn end_game(
        &mut self,
        board: &mut Leaderboard,
        name: &str,
    ) -> Result<(u32, usize), StoreError> {
        let rank = board.add_score(name, self.score)?;
        self.phase = Phase::GameOver;
        Ok((self.score, rank))
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Banked, permanent score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// At-risk points from the current streak.
    #[must_use]
    pub fn unbanked_points(&self) -> u32 {
        self.unbanked_points
    }

    /// Consecutive correct guesses since the last bank or loss.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// The active reference card for the next guess, if one is up.
    #[must_use]
    pub fn current_card(&self) -> Option<Card> {
        self.current_card
    }

    /// The card the active one was drawn against, if a round is in flight.
    #[must_use]
    pub fn previous_card(&self) -> Option<Card> {
        self.previous_card
    }

    /// Where the session currently sits.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cards left in the current deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_initial_state() {
        let session = GameSession::new(42);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.unbanked_points(), 0);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.phase(), Phase::AwaitingFirstCard);
        assert_eq!(session.current_card(), None);
        assert_eq!(session.cards_remaining(), 54);
    }

    #[test]
    fn test_same_seed_same_deck_order() {
        let mut a = GameSession::new(7);
        let mut b = GameSession::new(7);
        for _ in 0..54 {
            assert_eq!(a.draw_card().unwrap(), b.draw_card().unwrap());
        }
    }

    #[test]
    fn test_guess_parsing() {
        assert_eq!("h".parse::<Guess>().unwrap(), Guess::Higher);
        assert_eq!("HIGHER".parse::<Guess>().unwrap(), Guess::Higher);
        assert_eq!(" l ".parse::<Guess>().unwrap(), Guess::Lower);
        assert_eq!("Lower".parse::<Guess>().unwrap(), Guess::Lower);

        let err = "bank".parse::<Guess>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidGuess(s) if s == "bank"));
    }

    #[test]
    fn test_first_draw_moves_to_awaiting_guess() {
        let mut session = GameSession::new(3);
        loop {
            match session.draw_card().unwrap() {
                DrawOutcome::Card(card) => {
                    assert_eq!(session.current_card(), Some(card));
                    assert_eq!(session.phase(), Phase::AwaitingGuess);
                    break;
                }
                DrawOutcome::BonusLife(_) | DrawOutcome::DeckReplenished => continue,
            }
        }
    }

    #[test]
    fn test_draw_during_round_moves_to_resolution() {
        let mut session = GameSession::new(3);
        let first = draw_playable(&mut session);
        let second = draw_playable(&mut session);
        assert_eq!(session.phase(), Phase::AwaitingResolution);
        assert_eq!(session.previous_card(), Some(first));
        assert_eq!(session.current_card(), Some(second));
    }

    #[test]
    fn test_bank_zero_still_clears_streak() {
        let mut session = GameSession::new(1);
        session.resolve_correct().unwrap();
        session.bank_points().unwrap();
        // Score holds the banked points, streak is gone.
        assert_eq!(session.score(), 2);
        assert_eq!(session.streak(), 0);

        assert_eq!(session.bank_points().unwrap(), 0);
        assert_eq!(session.score(), 2);
        assert_eq!(session.streak(), 0);
    }

    #[test]
    fn test_rules_text_mentions_the_basics() {
        assert!(RULES_TEXT.contains("3 lives"));
        assert!(RULES_TEXT.contains("2 + streak * 2"));
        assert!(RULES_TEXT.contains("Joker"));
    }

    fn draw_playable(session: &mut GameSession) -> Card {
        loop {
            if let DrawOutcome::Card(card) = session.draw_card().unwrap() {
                return card;
            }
        }
    }
}
