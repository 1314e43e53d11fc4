//! Showdown outcomes, integer tallies and the normalized result type.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::score::HandScore;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    HeroWin,
    Tie,
    VillainWin,
}

impl Outcome {
    /// Lower score wins.
    #[inline(always)]
    pub fn compare(hero: HandScore, villain: HandScore) -> Outcome {
        if hero < villain {
            Outcome::HeroWin
        } else if hero > villain {
            Outcome::VillainWin
        } else {
            Outcome::Tie
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityCounts {
    pub win: u64,
    pub tie: u64,
    pub lose: u64,
}

impl EquityCounts {
    #[inline(always)]
    pub fn total(&self) -> u64 {
        self.win + self.tie + self.lose
    }

    #[inline(always)]
    pub fn bump(&mut self, out: Outcome) {
        match out {
            Outcome::HeroWin => self.win += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::VillainWin => self.lose += 1,
        }
    }

    /// "Equity" as win + 0.5*tie, normalized to [0,1].
    pub fn equity(&self) -> f64 {
        let t = self.total() as f64;
        if t == 0.0 {
            return 0.0;
        }
        (self.win as f64 + 0.5 * self.tie as f64) / t
    }
}

/// Shared win/tie/lose counters. Each unit of work folds its local tally in
/// exactly once.
#[derive(Debug, Default)]
pub(crate) struct AtomicCounts {
    win: AtomicU64,
    tie: AtomicU64,
    lose: AtomicU64,
}

impl AtomicCounts {
    pub(crate) fn fold(&self, local: &EquityCounts) {
        self.win.fetch_add(local.win, Ordering::Relaxed);
        self.tie.fetch_add(local.tie, Ordering::Relaxed);
        self.lose.fetch_add(local.lose, Ordering::Relaxed);
    }

    pub(crate) fn load(&self) -> EquityCounts {
        EquityCounts {
            win: self.win.load(Ordering::Relaxed),
            tie: self.tie.load(Ordering::Relaxed),
            lose: self.lose.load(Ordering::Relaxed),
        }
    }
}

/// Normalized outcome fractions for one equity request.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimResult {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub trials: u64,
    pub elapsed_ms: u64,
}

impl SimResult {
    /// Divide `counts` by `trials`; `trials` must be positive.
    pub(crate) fn from_counts(counts: EquityCounts, trials: u64, elapsed: Duration) -> Self {
        let t = trials as f64;
        Self {
            win: counts.win as f64 / t,
            tie: counts.tie as f64 / t,
            lose: counts.lose as f64 / t,
            trials,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn equity(&self) -> f64 {
        self.win + 0.5 * self.tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_score_wins() {
        assert_eq!(Outcome::compare(HandScore(1), HandScore(2)), Outcome::HeroWin);
        assert_eq!(Outcome::compare(HandScore(2), HandScore(1)), Outcome::VillainWin);
        assert_eq!(Outcome::compare(HandScore(5), HandScore(5)), Outcome::Tie);
    }

    #[test]
    fn fold_once_per_unit() {
        let shared = AtomicCounts::default();
        let mut a = EquityCounts::default();
        a.bump(Outcome::HeroWin);
        a.bump(Outcome::Tie);
        let mut b = EquityCounts::default();
        b.bump(Outcome::VillainWin);
        b.bump(Outcome::HeroWin);
        shared.fold(&a);
        shared.fold(&b);
        assert_eq!(shared.load(), EquityCounts { win: 2, tie: 1, lose: 1 });
    }

    #[test]
    fn normalized_fractions_sum_to_one() {
        let counts = EquityCounts { win: 3, tie: 1, lose: 4 };
        let r = SimResult::from_counts(counts, 8, Duration::from_millis(12));
        assert!((r.win + r.tie + r.lose - 1.0).abs() < 1e-12);
        assert_eq!(r.elapsed_ms, 12);
        assert!((r.equity() - counts.equity()).abs() < 1e-12);
    }
}
