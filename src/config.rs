//! Simulation limits, trial presets and the request builder.

use std::fmt;
use std::str::FromStr;

use crate::card::Card;
use crate::equity::SimResult;
use crate::error::EquityError;

/// Largest table the simulator accepts.
pub const MAX_PLAYERS: usize = 10;

/// Per-worker seed offset: worker `w` uses `seed + w * WORKER_SEED_STRIDE`.
pub const WORKER_SEED_STRIDE: u64 = 1_000_000_000;

/// Named trial budgets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Preset {
    Fast,
    #[default]
    Standard,
    High,
}

impl Preset {
    pub const fn trials(self) -> u64 {
        match self {
            Preset::Fast => 50_000,
            Preset::Standard => 200_000,
            Preset::High => 1_000_000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Preset::Fast => "fast",
            Preset::Standard => "standard",
            Preset::High => "high",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Preset::Fast),
            "standard" => Ok(Preset::Standard),
            "high" => Ok(Preset::High),
            _ => Err(EquityError::UnknownPreset(s.to_string())),
        }
    }
}

/// Trial count for a preset name; unknown names get the standard budget.
pub fn trials_for_preset(name: &str) -> u64 {
    name.parse::<Preset>().unwrap_or_default().trials()
}

/// One Monte Carlo request.
///
/// ```
/// use holdem_equity::{parse_cards, Preset, SimConfig};
///
/// let hero = parse_cards("As Ks").unwrap();
/// let r = SimConfig::new(3)
///     .preset(Preset::Fast)
///     .seed(7)
///     .run(&hero, &[])
///     .unwrap();
/// assert_eq!(r.trials, 50_000);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SimConfig {
    pub players: usize,
    pub trials: u64,
    pub seed: Option<u64>,
    /// `None` uses one worker per thread of the global pool.
    pub workers: Option<usize>,
}

impl SimConfig {
    pub fn new(players: usize) -> Self {
        Self {
            players,
            trials: Preset::default().trials(),
            seed: None,
            workers: None,
        }
    }

    pub fn trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.trials = preset.trials();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn run(&self, hero: &[Card], board: &[Card]) -> Result<SimResult, EquityError> {
        let workers = self.workers.unwrap_or_else(crate::simulate::default_workers);
        crate::simulate::simulate_with_workers(
            self.players,
            hero,
            board,
            self.trials,
            self.seed,
            workers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup() {
        assert_eq!(trials_for_preset("fast"), 50_000);
        assert_eq!(trials_for_preset("HIGH"), 1_000_000);
        assert_eq!(trials_for_preset("standard"), 200_000);
        assert_eq!(trials_for_preset("turbo"), 200_000);
        assert_eq!("Fast".parse::<Preset>(), Ok(Preset::Fast));
        assert_eq!(Preset::High.to_string(), "high");
        assert_eq!(
            "turbo".parse::<Preset>(),
            Err(EquityError::UnknownPreset("turbo".to_string()))
        );
    }

    #[test]
    fn builder_defaults() {
        let c = SimConfig::new(4);
        assert_eq!(c.trials, 200_000);
        assert_eq!(c.seed, None);
        let c = c.trials(10).seed(3).workers(2);
        assert_eq!((c.trials, c.seed, c.workers), (10, Some(3), Some(2)));
    }
}
