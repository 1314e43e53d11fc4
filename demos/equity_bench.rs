//! Benchmark equity calculations across board states and table sizes.
//!
//! Usage:
//!   RUST_LOG=debug cargo run --release --example equity_bench
//!
//! This measures:
//! - 7-card evaluation throughput
//! - Monte Carlo equity vs N random opponents (preflop, flop, turn, river)
//! - Exact heads-up equity vs a known hand

use std::time::Instant;

use holdem_equity::{
    default_workers, draw, exact_heads_up_vs_hand, parse_cards, score_best_ids, simulate, Card,
    Preset, SeededRng,
};

fn format_duration(nanos: u128) -> String {
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn bench<F>(name: &str, iterations: u64, mut f: F)
where
    F: FnMut() -> String,
{
    let start = Instant::now();
    let mut last = String::new();
    for _ in 0..iterations {
        last = f();
    }
    let duration = start.elapsed();
    let per_iter_ns = duration.as_nanos() / iterations as u128;

    println!("{:44} {:>12}  {}", name, format_duration(per_iter_ns), last);
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap_or_else(|e| panic!("bad card list {s:?}: {e}"))
}

fn main() {
    env_logger::init();

    println!("=== Equity Benchmarks ({} workers) ===\n", default_workers());
    println!("{:44} {:>12}  {}", "Scenario", "Time/Iter", "Result");
    println!("{:-<90}", "");

    println!("\n--- 7-card evaluation (1M random hands) ---");
    let mut rng = SeededRng::new(1);
    let hands: Vec<[u8; 7]> = (0..1_000_000)
        .map(|_| {
            let mut deck: Vec<u8> = (0..52).collect();
            let mut out = [0u8; 7];
            draw(&mut deck, 7, &mut rng, &mut out);
            out
        })
        .collect();
    let start = Instant::now();
    let acc = hands
        .iter()
        .fold(0u32, |acc, h| acc.wrapping_add(score_best_ids(h).0));
    let elapsed = start.elapsed();
    println!(
        "{:44} {:>12}  checksum {:08x} ({:.1} M hands/s)",
        "score_best_ids",
        format_duration(elapsed.as_nanos() / hands.len() as u128),
        acc,
        hands.len() as f64 / elapsed.as_secs_f64() / 1e6
    );

    let aces = cards("As Ah");
    let kings = cards("Ks Kh");
    let boards = [
        ("Preflop", cards("")),
        ("Flop", cards("Kc Qd 2h")),
        ("Turn", cards("Kc Qd 2h 3s")),
        ("River", cards("Kc Qd 2h 3s 4c")),
    ];

    println!("\n--- Monte Carlo, AA vs random ({} trials) ---", Preset::Fast.trials());
    for players in [2usize, 3, 6, 9] {
        for (street, board) in &boards {
            let name = format!("{players}-handed: {street}");
            bench(&name, 3, || {
                let r = simulate(players, &aces, board, Preset::Fast.trials(), Some(42))
                    .unwrap_or_else(|e| panic!("{e}"));
                format!("win {:.4} tie {:.4} lose {:.4}", r.win, r.tie, r.lose)
            });
        }
    }

    println!("\n--- Exact heads-up, AA vs KK ---");
    for (street, board) in &boards {
        let iters = if board.is_empty() { 1 } else { 10 };
        bench(&format!("Exact: {street}"), iters, || {
            let r = exact_heads_up_vs_hand(&aces, &kings, board).unwrap_or_else(|e| panic!("{e}"));
            format!("win {:.4} tie {:.4} ({} deals)", r.win, r.tie, r.trials)
        });
    }

    println!("\n{:-<90}", "");
    println!("Exact vs a random hand (exact_heads_up_preflop) enumerates ~2.1B deals;");
    println!("use it offline, and Monte Carlo with a preset for interactive requests.");
}
