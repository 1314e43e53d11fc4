//! Card types (Suit/Rank/Card).
//!
//! These are "zero-cost" abstractions: small enums and a small struct that
//! compile down to integer operations. Rank codes run strength-descending
//! (Ace = 0 .. Two = 12), so a numerically lower rank is a stronger card.

use std::fmt;
use std::str::FromStr;

use crate::error::EquityError;

const RANK_CHARS: &[u8; 13] = b"AKQJT98765432";
const SUIT_CHARS: &[u8; 4] = b"shdc";

/// A playing card suit, in the fixed order spade, heart, diamond, club.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    #[inline(always)]
    pub const fn idx(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Suit {
        match x & 0x3 {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }
}

/// A playing card rank.
///
/// Stored as 0..12 with Ace first; the evaluator works directly on these codes.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    Ace = 0,
    King = 1,
    Queen = 2,
    Jack = 3,
    Ten = 4,
    Nine = 5,
    Eight = 6,
    Seven = 7,
    Six = 8,
    Five = 9,
    Four = 10,
    Three = 11,
    Two = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ];

    #[inline(always)]
    pub const fn idx(self) -> u8 {
        self as u8
    }

    /// Convert 0..12 to a Rank (Ace..Two). Input is assumed valid.
    #[inline(always)]
    pub const fn from_u8(x: u8) -> Rank {
        match x {
            0 => Rank::Ace,
            1 => Rank::King,
            2 => Rank::Queen,
            3 => Rank::Jack,
            4 => Rank::Ten,
            5 => Rank::Nine,
            6 => Rank::Eight,
            7 => Rank::Seven,
            8 => Rank::Six,
            9 => Rank::Five,
            10 => Rank::Four,
            11 => Rank::Three,
            _ => Rank::Two,
        }
    }
}

/// A card = rank + suit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[inline(always)]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Deck index mapping: suit = id / 13, rank = id % 13.
    /// Input assumed to be in 0..52.
    #[inline(always)]
    pub const fn from_id(id: u8) -> Self {
        Self {
            suit: Suit::from_u8(id / 13),
            rank: Rank::from_u8(id % 13),
        }
    }

    /// Convert to 0..51 id (inverse of from_id).
    #[inline(always)]
    pub const fn id(self) -> u8 {
        self.suit.idx() * 13 + self.rank.idx()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_CHARS[self.rank.idx() as usize] as char,
            SUIT_CHARS[self.suit.idx() as usize] as char
        )
    }
}

impl FromStr for Card {
    type Err = EquityError;

    /// Parses "As", "td", "10h".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().replace("10", "T");
        let bytes = t.as_bytes();
        if bytes.len() != 2 {
            return Err(EquityError::ParseCard(s.to_string()));
        }
        let r = bytes[0].to_ascii_uppercase();
        let su = bytes[1].to_ascii_lowercase();
        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == r)
            .ok_or_else(|| EquityError::ParseCard(s.to_string()))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == su)
            .ok_or_else(|| EquityError::ParseCard(s.to_string()))?;
        Ok(Card::new(Rank::from_u8(rank as u8), Suit::from_u8(suit as u8)))
    }
}

/// Parse whitespace-separated cards ("As Kd 7h").
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EquityError> {
    s.split_whitespace().map(|p| p.parse::<Card>()).collect()
}
