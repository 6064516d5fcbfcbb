// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Ranks all 7 cards hands with parallel tasks.
//
// ```bash
// $ cargo r --release --features=parallel --example par_eval_all7 -- --tasks 8
// ```
use clap::Parser;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use handrank_eval::{Deck, Evaluator, HandRank, Hybrid};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of parallel tasks.
    #[clap(long, short, default_value_t = 4)]
    #[clap(value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: u16,
}

fn main() {
    let cli = Cli::parse();
    let num_tasks = cli.tasks as usize;
    let evaluator = Hybrid::new();

    // Per task counters to avoid contention.
    let task_counters = (0..num_tasks)
        .map(|_| {
            (0..HandRank::COUNT)
                .map(|_| AtomicU64::new(0))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let now = Instant::now();

    Deck::default().par_for_each(num_tasks, 7, |task_id, hand| {
        let rank = evaluator.rank(hand);
        task_counters[task_id][rank.hand_rank() as usize].fetch_add(1, Ordering::Relaxed);
    });

    let elapsed = now.elapsed().as_secs_f64();

    let counts = (0..HandRank::COUNT)
        .map(|r| {
            task_counters
                .iter()
                .map(|counters| counters[r].load(Ordering::Relaxed))
                .sum::<u64>()
        })
        .collect::<Vec<_>>();

    let total = counts.iter().sum::<u64>();
    println!("Total hands:     {total}");
    println!("Elapsed:         {elapsed:.3}s");
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for hand_rank in HandRank::ALL {
        let name = format!("{hand_rank}:");
        println!("{name:<16} {}", counts[hand_rank as usize]);
    }
}
