//! Texas Hold'em equity core: card model, 7-card evaluator, partial-shuffle
//! sampler, parallel Monte Carlo simulator and exact heads-up enumerator.

pub mod card;
pub mod config;
pub mod deck;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod exact;
pub mod score;
pub mod simulate;

pub use card::{parse_cards, Card, Rank, Suit};
pub use config::{trials_for_preset, Preset, SimConfig, MAX_PLAYERS, WORKER_SEED_STRIDE};
pub use deck::{build_deck, draw, SeededRng, ThreadUnits, UnitSource};
pub use equity::{EquityCounts, Outcome, SimResult};
pub use error::EquityError;
pub use evaluator::{score_best, score_best_ids, score_five_ids, score_hand, score_hole_board};
pub use exact::{exact_heads_up_preflop, exact_heads_up_vs_hand};
pub use score::{Category, HandScore};
pub use simulate::{default_workers, simulate, simulate_with_workers};
