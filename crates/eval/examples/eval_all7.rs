// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Ranks all 7 cards hands and prints the number of hands per category.
//
// ```bash
// $ cargo r --release --example eval_all7
// Total hands:     133784560
// Elapsed:         ...
//
// High Card:       23294460
// One Pair:        58627800
// Two Pair:        31433400
// Three of a Kind: 6461620
// Straight:        6180020
// Flush:           4047644
// Full House:      3473184
// Four of a Kind:  224848
// Straight Flush:  41584
// ```
use std::time::Instant;

use handrank_eval::{Deck, Evaluator, HandRank, Hybrid};

fn main() {
    // Build the table before timing.
    let evaluator = Hybrid::new();

    let now = Instant::now();
    let mut counts = [0usize; HandRank::COUNT];

    Deck::default().for_each(7, |hand| {
        let rank = evaluator.rank(hand);
        counts[rank.hand_rank() as usize] += 1;
    });

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands:     {total}");
    println!("Elapsed:         {elapsed:.3}s");
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for hand_rank in HandRank::ALL {
        let name = format!("{hand_rank}:");
        println!("{name:<16} {}", counts[hand_rank as usize]);
    }
}
