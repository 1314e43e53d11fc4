//! Crate-wide error type.

use thiserror::Error;

use crate::card::Card;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EquityError {
    #[error("hand evaluation needs {expected} cards, got {got}")]
    InvalidCardCount { expected: &'static str, got: usize },

    #[error("hero must hold exactly 2 cards, got {0}")]
    InvalidHeroCount(usize),

    #[error("board must have 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardCount(usize),

    #[error("player count {players} is outside 1..={max}")]
    PlayersOutOfRange { players: usize, max: usize },

    #[error("trial budget must be positive")]
    ZeroTrials,

    #[error("duplicate card: {0}")]
    DuplicateCard(Card),

    #[error("no states were enumerated")]
    NoStatesEnumerated,

    #[error("cannot parse card {0:?}")]
    ParseCard(String),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}
