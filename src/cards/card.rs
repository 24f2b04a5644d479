//! Card value types.
//!
//! ## Rank
//!
//! A tagged variant: `Numeric(2..=14)` for the ordered ranks (11 = Jack,
//! 12 = Queen, 13 = King, 14 = Ace) or `Joker`, which has no ordinal.
//! Comparing through a Joker is a contract violation and surfaces as
//! [`InvalidComparison`] instead of a silent boolean - an invalid
//! comparison can never be mistaken for a valid outcome, which is why
//! `Card` deliberately does not implement `PartialOrd`.
//!
//! ## Suit
//!
//! The four French suits plus the two Joker colors. Suit never
//! participates in ordering; `Red` and `Black` exist only so the two
//! bonus-life Jokers are distinct values.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Smallest numeric rank ordinal (the Two).
pub const MIN_RANK: u8 = 2;
/// Largest numeric rank ordinal (the Ace, which plays high).
pub const MAX_RANK: u8 = 14;

/// A card's comparable value, or `Joker` which has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ordered rank in `2..=14`; 11-14 are Jack, Queen, King, Ace.
    Numeric(u8),
    /// Bonus-life marker with no ordinal. Cannot be compared.
    Joker,
}

impl Rank {
    /// Create a numeric rank.
    ///
    /// Panics if `ordinal` is outside `2..=14`.
    #[must_use]
    pub fn numeric(ordinal: u8) -> Self {
        assert!(
            (MIN_RANK..=MAX_RANK).contains(&ordinal),
            "rank ordinal must be in 2..=14, got {ordinal}"
        );
        Self::Numeric(ordinal)
    }

    /// The ordinal of a numeric rank, or `None` for a Joker.
    #[must_use]
    pub const fn ordinal(self) -> Option<u8> {
        match self {
            Self::Numeric(n) => Some(n),
            Self::Joker => None,
        }
    }

    /// Is this the Joker rank?
    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Self::Joker)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(11) => write!(f, "Jack"),
            Self::Numeric(12) => write!(f, "Queen"),
            Self::Numeric(13) => write!(f, "King"),
            Self::Numeric(14) => write!(f, "Ace"),
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Joker => write!(f, "Joker"),
        }
    }
}

/// Card suit. `Red` and `Black` belong to the two Jokers only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    /// The red Joker's "suit".
    Red,
    /// The black Joker's "suit".
    Black,
}

/// The four standard suits in deterministic build order.
pub const STANDARD_SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hearts => "Hearts",
            Self::Diamonds => "Diamonds",
            Self::Clubs => "Clubs",
            Self::Spades => "Spades",
            Self::Red => "Red",
            Self::Black => "Black",
        };
        write!(f, "{name}")
    }
}

/// Error returned when a Joker is used in a rank comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InvalidComparison;

impl fmt::Display for InvalidComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Jokers have no rank and cannot be compared")
    }
}

impl std::error::Error for InvalidComparison {}

/// An immutable playing card.
///
/// Two cards compare only by rank; suit is flavor. Cards are plain `Copy`
/// values and are never mutated after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a standard card from a rank ordinal (`2..=14`) and suit.
    ///
    /// Panics if `ordinal` is out of range; use [`Card::joker`] for Jokers.
    #[must_use]
    pub fn standard(ordinal: u8, suit: Suit) -> Self {
        Self {
            rank: Rank::numeric(ordinal),
            suit,
        }
    }

    /// Create one of the two Jokers. `red` selects the red one.
    #[must_use]
    pub const fn joker(red: bool) -> Self {
        Self {
            rank: Rank::Joker,
            suit: if red { Suit::Red } else { Suit::Black },
        }
    }

    /// Is this card a Joker?
    #[must_use]
    pub const fn is_joker(self) -> bool {
        self.rank.is_joker()
    }

    /// Compare this card's rank against another's.
    ///
    /// Fails with [`InvalidComparison`] if either operand is a Joker.
    pub fn compare(self, other: Card) -> Result<Ordering, InvalidComparison> {
        match (self.rank.ordinal(), other.rank.ordinal()) {
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            _ => Err(InvalidComparison),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            write!(f, "{} {}", self.suit, self.rank)
        } else {
            write!(f, "{} of {}", self.rank, self.suit)
        }
    }
}
