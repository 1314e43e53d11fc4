//! Sort-based hand evaluator.
//!
//! A 5-card hand is scored from its rank codes sorted by descending code:
//! flush/straight tests and rank-count groups pick the category, and the same
//! sorted ranks are packed verbatim as the kicker. The kicker is therefore not
//! regrouped by pair/trip membership; both sides of every comparison go through
//! the same procedure, so scores stay totally ordered and comparable.
//!
//! A 7-card hand scores as the minimum over its 21 five-card subsets.

use crate::card::Card;
use crate::error::EquityError;
use crate::score::{pack_score, Category, HandScore};

/// Ace-5-4-3-2 as ascending rank codes (Ace = 0 .. Two = 12).
const WHEEL: [u8; 5] = [0, 9, 10, 11, 12];

/// Kicker ranks for a wheel: the Ace plays below the Two as code 13.
const WHEEL_KICKER: [u8; 5] = [13, 12, 11, 10, 9];

/// The 21 (i, j) index pairs dropped from a 7-card set.
const DROP_PAIRS: [(usize, usize); 21] = {
    let mut out = [(0usize, 0usize); 21];
    let mut n = 0;
    let mut i = 0;
    while i < 7 {
        let mut j = i + 1;
        while j < 7 {
            out[n] = (i, j);
            n += 1;
            j += 1;
        }
        i += 1;
    }
    out
};

#[inline(always)]
fn is_straight(desc: &[u8; 5]) -> bool {
    let mut asc = *desc;
    asc.reverse();
    let a = asc[0];
    (asc[1] == a + 1 && asc[2] == a + 2 && asc[3] == a + 3 && asc[4] == a + 4) || asc == WHEEL
}

/// Score 5 card ids (0..52). Lower is stronger.
#[inline]
pub fn score_five_ids(ids: &[u8; 5]) -> HandScore {
    let mut ranks = [0u8; 5];
    let mut suits = [0u8; 5];
    for (i, &id) in ids.iter().enumerate() {
        ranks[i] = id % 13;
        suits[i] = id / 13;
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let flush = suits.iter().all(|&s| s == suits[0]);

    // (rank, count) runs over the sorted ranks
    let mut groups = [(0u8, 0u8); 5];
    let mut ng = 0usize;
    for &r in &ranks {
        if ng > 0 && groups[ng - 1].0 == r {
            groups[ng - 1].1 += 1;
        } else {
            groups[ng] = (r, 1);
            ng += 1;
        }
    }
    let groups = &mut groups[..ng];
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let straight = is_straight(&ranks);
    let top = groups[0].1;
    let second = if ng >= 2 { groups[1].1 } else { 0 };

    let cat = if flush && straight {
        Category::StraightFlush
    } else if top == 4 {
        Category::Quads
    } else if top == 3 && second == 2 {
        Category::FullHouse
    } else if flush {
        Category::Flush
    } else if straight {
        Category::Straight
    } else if top == 3 {
        Category::Trips
    } else if top == 2 && second == 2 {
        Category::TwoPair
    } else if top == 2 {
        Category::OnePair
    } else {
        Category::HighCard
    };

    if straight && ranks == [12, 11, 10, 9, 0] {
        return pack_score(cat, WHEEL_KICKER);
    }
    pack_score(cat, ranks)
}

/// Best 5-card score out of 7 card ids. Lower is stronger.
#[inline]
pub fn score_best_ids(ids: &[u8; 7]) -> HandScore {
    let mut best = HandScore(u32::MAX);
    let mut five = [0u8; 5];
    for &(i, j) in DROP_PAIRS.iter() {
        let mut k = 0;
        for (p, &id) in ids.iter().enumerate() {
            if p != i && p != j {
                five[k] = id;
                k += 1;
            }
        }
        let s = score_five_ids(&five);
        if s < best {
            best = s;
        }
    }
    best
}

/// Score two hole card ids together with a complete 5-card board.
#[inline(always)]
pub fn score_hole_board(hole: [u8; 2], board: &[u8; 5]) -> HandScore {
    score_best_ids(&[hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]])
}

/// Best hand out of exactly 7 cards.
pub fn score_best(cards: &[Card]) -> Result<HandScore, EquityError> {
    let ids: [u8; 7] = ids_of(cards).map_err(|got| EquityError::InvalidCardCount {
        expected: "7",
        got,
    })?;
    Ok(score_best_ids(&ids))
}

/// Score 5 or 7 cards.
pub fn score_hand(cards: &[Card]) -> Result<HandScore, EquityError> {
    match cards.len() {
        5 => {
            let ids: [u8; 5] = ids_of(cards).map_err(|got| EquityError::InvalidCardCount {
                expected: "5 or 7",
                got,
            })?;
            Ok(score_five_ids(&ids))
        }
        7 => score_best(cards),
        got => Err(EquityError::InvalidCardCount {
            expected: "5 or 7",
            got,
        }),
    }
}

#[inline]
fn ids_of<const N: usize>(cards: &[Card]) -> Result<[u8; N], usize> {
    if cards.len() != N {
        return Err(cards.len());
    }
    let mut out = [0u8; N];
    for (dst, c) in out.iter_mut().zip(cards) {
        *dst = c.id();
    }
    Ok(out)
}
