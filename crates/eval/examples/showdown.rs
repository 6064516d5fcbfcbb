// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Deals random hi/lo hands and prints the showdown.
//
// ```bash
// $ cargo r --release --example showdown -- --players 4 --pot 1000
// ```
use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::SmallRng};

use handrank_eval::{Card, Deck, Eval, Hybrid, Low, Showdown};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players.
    #[clap(long, short, default_value_t = 4)]
    #[clap(value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// The pot amount.
    #[clap(long, default_value_t = 1000)]
    pot: u64,
    /// Random seed.
    #[clap(long, short)]
    seed: Option<u64>,
}

fn cards_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut deck = Deck::new_and_shuffled(&mut rng);
    let mut deal = |n: usize| (0..n).filter_map(|_| deck.deal()).collect::<Vec<_>>();

    let pockets = (0..cli.players).map(|_| deal(2)).collect::<Vec<_>>();
    let board = deal(5);
    println!("Board: {}\n", cards_to_string(&board));

    let evaluator = Hybrid::new();
    let evals = pockets
        .iter()
        .map(|pocket| Eval::with_low(&evaluator, Low::EightOrBetter, pocket, &board))
        .collect::<Result<Vec<_>, _>>()?;

    for (idx, (pocket, eval)) in pockets.iter().zip(&evals).enumerate() {
        println!(
            "Player {idx}: {}  hi {} [{}]  lo {} [{}]",
            cards_to_string(pocket),
            eval.hi_rank().hand_rank(),
            cards_to_string(eval.hi_best()),
            eval.lo_rank(),
            cards_to_string(eval.lo_best()),
        );
    }

    let showdown = Showdown::new(&evals, true);
    println!("\nHigh winners: {:?}", showdown.hi_winners());
    println!("Low winners:  {:?}", showdown.lo_winners());
    println!("Scoop:        {}", showdown.is_scoop());

    for (idx, amount) in showdown.split_pot(cli.pot) {
        println!("Player {idx} wins {amount}");
    }

    Ok(())
}
