//! Parallel Monte Carlo equity for a hero hand against N random opponents.
//!
//! Trials are split into `W` contiguous chunks, one per worker. Each worker
//! owns its deck copy, draw buffer and RNG, tallies locally and folds its
//! counts into the shared totals once when its chunk is done.

use std::ops::Range;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::card::Card;
use crate::config::{MAX_PLAYERS, WORKER_SEED_STRIDE};
use crate::deck::{build_deck, draw, SeededRng, ThreadUnits, UnitSource};
use crate::equity::{AtomicCounts, EquityCounts, Outcome, SimResult};
use crate::error::EquityError;
use crate::evaluator::score_hole_board;

/// Number of workers used when the caller does not pick one.
pub fn default_workers() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads().max(1)
    }
    #[cfg(not(feature = "parallel"))]
    {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Monte Carlo equity with one worker per pool thread.
///
/// - `players`: hero plus opponents, 1..=10
/// - `hero`: exactly 2 cards
/// - `board`: 0, 3, 4 or 5 known community cards
/// - `seed`: fixes the result for a given worker count
pub fn simulate(
    players: usize,
    hero: &[Card],
    board: &[Card],
    trials: u64,
    seed: Option<u64>,
) -> Result<SimResult, EquityError> {
    simulate_with_workers(players, hero, board, trials, seed, default_workers())
}

/// Monte Carlo equity with an explicit worker count.
///
/// With `seed = Some(s)` worker `w` draws from `SeededRng(s + w * 1e9)`, so two
/// calls with the same arguments return identical fractions.
pub fn simulate_with_workers(
    players: usize,
    hero: &[Card],
    board: &[Card],
    trials: u64,
    seed: Option<u64>,
    workers: usize,
) -> Result<SimResult, EquityError> {
    let table = Table::new(players, hero, board)?;
    if trials == 0 {
        return Err(EquityError::ZeroTrials);
    }
    let workers = workers.max(1);
    let chunk = trials.div_ceil(workers as u64);

    log::debug!(
        "simulate: players={} board={} trials={} workers={} seeded={}",
        players,
        board.len(),
        trials,
        workers,
        seed.is_some()
    );

    let start = Instant::now();
    let shared = AtomicCounts::default();

    let unit = |w: usize| {
        let lo = w as u64 * chunk;
        let hi = (lo + chunk).min(trials);
        if lo >= hi {
            return;
        }
        let local = table.run_worker(w, lo..hi, seed);
        log::trace!("worker {w}: trials {lo}..{hi} -> {local:?}");
        shared.fold(&local);
    };

    #[cfg(feature = "parallel")]
    (0..workers).into_par_iter().for_each(unit);
    #[cfg(not(feature = "parallel"))]
    (0..workers).for_each(unit);

    let counts = shared.load();
    debug_assert_eq!(counts.total(), trials);
    let result = SimResult::from_counts(counts, trials, start.elapsed());
    log::debug!(
        "simulate: win={:.4} tie={:.4} lose={:.4} in {}ms",
        result.win,
        result.tie,
        result.lose,
        result.elapsed_ms
    );
    Ok(result)
}

/// Everything a worker needs that stays fixed for the whole call.
struct Table {
    hero: [u8; 2],
    /// Known board in the leading slots; the rest is filled per trial.
    board: [u8; 5],
    known_board: usize,
    opponents: usize,
    template: Vec<u8>,
}

impl Table {
    fn new(players: usize, hero: &[Card], board: &[Card]) -> Result<Self, EquityError> {
        if !(1..=MAX_PLAYERS).contains(&players) {
            return Err(EquityError::PlayersOutOfRange {
                players,
                max: MAX_PLAYERS,
            });
        }
        if hero.len() != 2 {
            return Err(EquityError::InvalidHeroCount(hero.len()));
        }
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(EquityError::InvalidBoardCount(board.len()));
        }

        let mut board5 = [0u8; 5];
        for (dst, c) in board5.iter_mut().zip(board) {
            *dst = c.id();
        }
        let known: Vec<Card> = hero.iter().chain(board).copied().collect();

        Ok(Self {
            hero: [hero[0].id(), hero[1].id()],
            board: board5,
            known_board: board.len(),
            opponents: players - 1,
            template: build_deck(&known),
        })
    }

    #[inline(always)]
    fn needed_board(&self) -> usize {
        5 - self.known_board
    }

    #[inline(always)]
    fn draws_per_trial(&self) -> usize {
        self.opponents * 2 + self.needed_board()
    }

    fn run_worker(&self, worker: usize, trials: Range<u64>, seed: Option<u64>) -> EquityCounts {
        match seed {
            Some(s) => {
                let mut rng =
                    SeededRng::new(s.wrapping_add((worker as u64).wrapping_mul(WORKER_SEED_STRIDE)));
                self.run_trials(trials, &mut rng)
            }
            None => self.run_trials(trials, &mut ThreadUnits::new()),
        }
    }

    fn run_trials<R: UnitSource>(&self, trials: Range<u64>, rng: &mut R) -> EquityCounts {
        let mut counts = EquityCounts::default();
        let mut deck = self.template.clone();
        let mut scratch = vec![0u8; self.draws_per_trial()];
        let mut board = self.board;
        for _ in trials {
            deck.copy_from_slice(&self.template);
            counts.bump(self.trial(&mut deck, rng, &mut scratch, &mut board));
        }
        counts
    }

    /// One deal: complete the board, deal every opponent, compare hero to the
    /// best opponent.
    #[inline]
    fn trial<R: UnitSource>(
        &self,
        deck: &mut [u8],
        rng: &mut R,
        scratch: &mut [u8],
        board: &mut [u8; 5],
    ) -> Outcome {
        let need = self.needed_board();
        draw(deck, scratch.len(), rng, scratch);
        board[self.known_board..].copy_from_slice(&scratch[..need]);
        let board: &[u8; 5] = board;

        let opponents = scratch[need..].chunks_exact(2).map(|h| [h[0], h[1]]);
        showdown(self.hero, opponents, board)
    }
}

/// Compare hero against the best of `opponents` on a full board. No
/// opponents means hero wins.
pub(crate) fn showdown<I>(hero: [u8; 2], opponents: I, board: &[u8; 5]) -> Outcome
where
    I: IntoIterator<Item = [u8; 2]>,
{
    let hs = score_hole_board(hero, board);
    opponents
        .into_iter()
        .map(|hole| score_hole_board(hole, board))
        .min()
        .map_or(Outcome::HeroWin, |opp| Outcome::compare(hs, opp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn assert_normalized(r: &SimResult) {
        assert!((r.win + r.tie + r.lose - 1.0).abs() < 1e-9, "{r:?}");
    }

    #[test]
    fn fractions_sum_to_one_for_every_board_size() {
        let hero = cards("As Kd");
        for board in ["", "7h 8h 2c", "7h 8h 2c Qs", "7h 8h 2c Qs 3d"] {
            for players in [2, 4, 10] {
                let r = simulate(players, &hero, &cards(board), 3_001, Some(11)).unwrap();
                assert_eq!(r.trials, 3_001);
                assert_normalized(&r);
            }
        }
    }

    #[test]
    fn seeded_runs_are_bit_identical() {
        let hero = cards("Qh Qd");
        let board = cards("2s 9c Jd");
        let a = simulate_with_workers(3, &hero, &board, 20_000, Some(42), 4).unwrap();
        let b = simulate_with_workers(3, &hero, &board, 20_000, Some(42), 4).unwrap();
        assert_eq!((a.win, a.tie, a.lose), (b.win, b.tie, b.lose));

        let c = simulate_with_workers(3, &hero, &board, 20_000, Some(43), 4).unwrap();
        assert_ne!((a.win, a.tie, a.lose), (c.win, c.tie, c.lose));
    }

    #[test]
    fn worker_chunks_match_a_manual_replay() {
        // 10 trials over 3 workers -> chunks of 4, 4, 2
        let hero = cards("Ah Kh");
        let table = Table::new(2, &hero, &[]).unwrap();
        let mut expected = EquityCounts::default();
        for (w, range) in [(0usize, 0..4u64), (1, 4..8), (2, 8..10)] {
            let c = table.run_worker(w, range, Some(5));
            expected.win += c.win;
            expected.tie += c.tie;
            expected.lose += c.lose;
        }
        let r = simulate_with_workers(2, &hero, &[], 10, Some(5), 3).unwrap();
        assert_eq!(r.win, expected.win as f64 / 10.0);
        assert_eq!(r.tie, expected.tie as f64 / 10.0);
    }

    #[test]
    fn more_workers_than_trials() {
        let r = simulate_with_workers(2, &cards("As Ad"), &[], 3, Some(1), 8).unwrap();
        assert_eq!(r.trials, 3);
        assert_normalized(&r);
    }

    #[test]
    fn lone_hero_always_wins() {
        let r = simulate(1, &cards("7c 2d"), &cards("As Ks"), 500, None);
        assert!(matches!(r, Err(EquityError::InvalidBoardCount(2))));

        let r = simulate(1, &cards("7c 2d"), &[], 500, None).unwrap();
        assert_eq!(r.win, 1.0);
        let r = simulate(1, &cards("7c 2d"), &cards("As Ks Qs Js Ts"), 10, Some(3)).unwrap();
        assert_eq!(r.win, 1.0);
    }

    #[test]
    fn royal_flush_on_board_always_ties() {
        let r = simulate(4, &cards("7c 2d"), &cards("As Ks Qs Js Ts"), 2_000, Some(9)).unwrap();
        assert_eq!(r.tie, 1.0);
    }

    #[test]
    fn unseeded_run_is_normalized() {
        let r = simulate(6, &cards("Jc Tc"), &cards("9c 8c 2h"), 5_000, None).unwrap();
        assert_normalized(&r);
    }

    #[test]
    fn aces_beat_seven_deuce() {
        let aa = simulate(2, &cards("As Ah"), &[], 40_000, Some(1)).unwrap();
        let trash = simulate(2, &cards("7c 2d"), &[], 40_000, Some(1)).unwrap();
        assert!(aa.win > trash.win + 0.1, "aa={aa:?} 72={trash:?}");
    }

    #[test]
    fn precondition_violations() {
        let hero = cards("As Ks");
        assert_eq!(
            simulate(2, &cards("As"), &[], 10, None),
            Err(EquityError::InvalidHeroCount(1))
        );
        assert_eq!(
            simulate(2, &hero, &cards("2c"), 10, None),
            Err(EquityError::InvalidBoardCount(1))
        );
        assert_eq!(
            simulate(0, &hero, &[], 10, None),
            Err(EquityError::PlayersOutOfRange { players: 0, max: MAX_PLAYERS })
        );
        let too_many = simulate(11, &hero, &[], 10, None).unwrap_err();
        assert_eq!(too_many, EquityError::PlayersOutOfRange { players: 11, max: 10 });
        assert_eq!(too_many.to_string(), "player count 11 is outside 1..=10");
        assert_eq!(simulate(2, &hero, &[], 0, None), Err(EquityError::ZeroTrials));
    }

    #[test]
    fn showdown_picks_best_opponent() {
        let ids = |s: &str| -> Vec<u8> { cards(s).iter().map(|c| c.id()).collect() };
        let b = ids("Ts 9h 5d 4c Kd");
        let board = [b[0], b[1], b[2], b[3], b[4]];
        let hole = |s: &str| {
            let v = ids(s);
            [v[0], v[1]]
        };
        // hero pairs the king, one opponent makes a king-high straight
        let hero = hole("Kh Qc");
        let weak = hole("2s 3s");
        let straight = hole("Jd Qd");
        assert_eq!(showdown(hero, [weak], &board), Outcome::HeroWin);
        assert_eq!(showdown(hero, [weak, straight], &board), Outcome::VillainWin);
        assert_eq!(showdown(hero, Vec::<[u8; 2]>::new(), &board), Outcome::HeroWin);
    }
}
