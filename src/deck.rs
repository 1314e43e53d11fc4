//! Deck construction and the partial Fisher–Yates sampler.
//!
//! A deck is the ascending list of card ids not already known. Drawing shuffles
//! only the prefix it needs, so every trial must work on its own copy of the
//! template.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::card::Card;

/// Supplier of independent uniform values in [0, 1).
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> UnitSource for F {
    #[inline(always)]
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Linear congruential generator: `s = s * 1664525 + 1013904223 (mod 2^64)`,
/// output `(s >> 32) / 2^32`. Same seed, same sequence.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    #[inline(always)]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl UnitSource for SeededRng {
    #[inline(always)]
    fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.state >> 32) as f64 / (1u64 << 32) as f64
    }
}

/// Non-reproducible source seeded from OS entropy.
#[derive(Clone, Debug)]
pub struct ThreadUnits(SmallRng);

impl ThreadUnits {
    pub fn new() -> Self {
        Self(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl Default for ThreadUnits {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitSource for ThreadUnits {
    #[inline(always)]
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Card ids 0..52 minus every known card, in ascending order.
pub fn build_deck(known: &[Card]) -> Vec<u8> {
    let mut used: u64 = 0;
    for c in known {
        used |= 1u64 << c.id();
    }
    (0u8..52).filter(|&id| used & (1u64 << id) == 0).collect()
}

/// Partial Fisher–Yates: for i in 0..n swap `deck[i]` with a uniform pick from
/// `deck[i..]` and write it to `out[i]`. Mutates the deck prefix.
#[inline]
pub fn draw<R: UnitSource + ?Sized>(deck: &mut [u8], n: usize, rng: &mut R, out: &mut [u8]) {
    debug_assert!(n <= deck.len() && n <= out.len());
    let len = deck.len();
    for i in 0..n {
        let j = i + (rng.next_unit() * (len - i) as f64) as usize;
        // guards against a unit source that returns exactly 1.0
        let j = j.min(len - 1);
        deck.swap(i, j);
        out[i] = deck[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;

    #[test]
    fn deck_excludes_hero_cards() {
        let hero = parse_cards("As Ks").unwrap();
        let deck = build_deck(&hero);
        assert_eq!(deck.len(), 50);
        assert!(!deck.contains(&hero[0].id()));
        assert!(!deck.contains(&hero[1].id()));
        assert!(deck.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn deck_with_board() {
        let known = parse_cards("As Ks 2c 7d 9h").unwrap();
        assert_eq!(build_deck(&known).len(), 47);
        assert_eq!(build_deck(&[]).len(), 52);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        let mut c = SeededRng::new(43);
        let xs: Vec<f64> = (0..64).map(|_| a.next_unit()).collect();
        let ys: Vec<f64> = (0..64).map(|_| b.next_unit()).collect();
        let zs: Vec<f64> = (0..64).map(|_| c.next_unit()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
        assert!(xs.iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn seeded_rng_first_value() {
        let mut r = SeededRng::new(0);
        let expected = (1013904223u64 >> 32) as f64 / (1u64 << 32) as f64;
        assert_eq!(r.next_unit(), expected);
    }

    #[test]
    fn draws_are_unique_and_from_deck() {
        let known = parse_cards("As Ks").unwrap();
        let template = build_deck(&known);
        let mut rng = SeededRng::new(7);
        let mut out = [0u8; 23];
        for _ in 0..200 {
            let mut deck = template.clone();
            draw(&mut deck, out.len(), &mut rng, &mut out);
            let mut seen = 0u64;
            for &id in &out {
                assert!(template.contains(&id));
                assert_eq!(seen & (1u64 << id), 0);
                seen |= 1u64 << id;
            }
        }
    }

    #[test]
    fn closure_unit_source() {
        let mut deck: Vec<u8> = (0..10).collect();
        let mut out = [0u8; 3];
        let mut zero = || 0.0;
        draw(&mut deck, 3, &mut zero, &mut out);
        assert_eq!(out, [0, 1, 2]);

        let mut deck: Vec<u8> = (0..10).collect();
        let mut almost_one = || 0.999_999;
        draw(&mut deck, 1, &mut almost_one, &mut out);
        assert_eq!(out[0], 9);
    }

    #[test]
    fn thread_units_in_range() {
        let mut r = ThreadUnits::new();
        for _ in 0..1000 {
            let x = r.next_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
