//! Exact heads-up equity by exhaustive enumeration.
//!
//! `exact_heads_up_preflop` walks every opponent hole pair from the 50 unseen
//! cards and every 5-card board from the 48 left after that: 1225 * 1,712,304
//! deals. Opponent pairs are the unit of parallel work; each folds its tally
//! into the shared counters once.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::card::Card;
use crate::deck::build_deck;
use crate::equity::{AtomicCounts, EquityCounts, Outcome, SimResult};
use crate::error::EquityError;
use crate::evaluator::score_hole_board;

/// Call `f` once per way of filling the board from `rem`, with the known board
/// cards in the leading slots.
fn for_each_completion(rem: &[u8], known: &[u8], mut f: impl FnMut(&[u8; 5])) {
    let base = known.len();
    let k = 5 - base;
    let m = rem.len();
    if k > m {
        return;
    }

    let mut board = [0u8; 5];
    board[..base].copy_from_slice(known);
    let mut idx = [0usize; 5];
    for (i, slot) in idx.iter_mut().enumerate().take(k) {
        *slot = i;
    }

    loop {
        for i in 0..k {
            board[base + i] = rem[idx[i]];
        }
        f(&board);

        // advance to the next k-combination in lexicographic order
        let mut i = k;
        while i > 0 && idx[i - 1] == m - k + i - 1 {
            i -= 1;
        }
        if i == 0 {
            return;
        }
        idx[i - 1] += 1;
        for t in i..k {
            idx[t] = idx[t - 1] + 1;
        }
    }
}

fn distinct_ids(cards: &[Card]) -> Result<Vec<u8>, EquityError> {
    let mut used = 0u64;
    let mut out = Vec::with_capacity(cards.len());
    for c in cards {
        let bit = 1u64 << c.id();
        if used & bit != 0 {
            return Err(EquityError::DuplicateCard(*c));
        }
        used |= bit;
        out.push(c.id());
    }
    Ok(out)
}

fn hole_ids(hole: &[Card]) -> Result<[u8; 2], EquityError> {
    if hole.len() != 2 {
        return Err(EquityError::InvalidHeroCount(hole.len()));
    }
    let ids = distinct_ids(hole)?;
    Ok([ids[0], ids[1]])
}

fn finish(counts: EquityCounts, start: Instant) -> Result<SimResult, EquityError> {
    let total = counts.total();
    if total == 0 {
        return Err(EquityError::NoStatesEnumerated);
    }
    Ok(SimResult::from_counts(counts, total, start.elapsed()))
}

/// Exact equity of a 2-card hero against one random opponent with no board.
///
/// Warning: this is ~2.1 billion showdowns; expect minutes, not milliseconds.
pub fn exact_heads_up_preflop(hero: &[Card]) -> Result<SimResult, EquityError> {
    let hero_ids = hole_ids(hero)?;
    let start = Instant::now();
    let unseen = build_deck(hero);

    let mut pairs = Vec::with_capacity(unseen.len() * (unseen.len() - 1) / 2);
    for (i, &a) in unseen.iter().enumerate() {
        for &b in &unseen[i + 1..] {
            pairs.push([a, b]);
        }
    }
    log::debug!(
        "exact preflop: hero={}{} opponent pairs={}",
        hero[0],
        hero[1],
        pairs.len()
    );

    let shared = AtomicCounts::default();
    let unit = |opp: &[u8; 2]| {
        let rem: Vec<u8> = unseen
            .iter()
            .copied()
            .filter(|&c| c != opp[0] && c != opp[1])
            .collect();
        let mut local = EquityCounts::default();
        for_each_completion(&rem, &[], |board| {
            let hs = score_hole_board(hero_ids, board);
            let os = score_hole_board(*opp, board);
            local.bump(Outcome::compare(hs, os));
        });
        shared.fold(&local);
    };

    #[cfg(feature = "parallel")]
    pairs.par_iter().for_each(unit);
    #[cfg(not(feature = "parallel"))]
    pairs.iter().for_each(unit);

    let result = finish(shared.load(), start)?;
    log::debug!(
        "exact preflop: {} deals, win={:.5} tie={:.5} in {}ms",
        result.trials,
        result.win,
        result.tie,
        result.elapsed_ms
    );
    Ok(result)
}

/// Exact equity of hero against one known villain hand, enumerating every
/// completion of `board` (0, 3, 4 or 5 cards).
pub fn exact_heads_up_vs_hand(
    hero: &[Card],
    villain: &[Card],
    board: &[Card],
) -> Result<SimResult, EquityError> {
    let hero_ids = hole_ids(hero)?;
    let villain_ids = hole_ids(villain)?;
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(EquityError::InvalidBoardCount(board.len()));
    }
    let known: Vec<Card> = hero.iter().chain(villain).chain(board).copied().collect();
    let known_ids = distinct_ids(&known)?;

    let start = Instant::now();
    let rem = build_deck(&known);
    let mut counts = EquityCounts::default();
    for_each_completion(&rem, &known_ids[4..], |b| {
        let hs = score_hole_board(hero_ids, b);
        let vs = score_hole_board(villain_ids, b);
        counts.bump(Outcome::compare(hs, vs));
    });

    let result = finish(counts, start)?;
    log::debug!(
        "exact vs hand: board={} deals={} win={:.5}",
        board.len(),
        result.trials,
        result.win
    );
    Ok(result)
}
