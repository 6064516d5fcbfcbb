// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Generates or loads the hand ranks table, verifies it and optionally saves it.
//
// ```bash
// $ cargo r --release --example table -- --save handranks.dat
// $ HANDRANK_TABLE=handranks.dat cargo r --release --example eval_all7
// ```
use anyhow::{Result, bail};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use handrank_eval::{Cactus, Deck, Evaluator, TableConfig, TwoPlusTwo};

#[derive(Debug, Parser)]
struct Cli {
    /// Load the table from this file instead of generating it.
    #[clap(long, short)]
    load: Option<PathBuf>,
    /// Save the table to this file.
    #[clap(long, short)]
    save: Option<PathBuf>,
    /// The expected table xxh3 checksum in hex.
    #[clap(long, short, value_parser = parse_hex)]
    checksum: Option<u64>,
    /// Check the table against the perfect hash evaluator for all 5 cards hands.
    #[clap(long)]
    check: bool,
}

fn parse_hex(s: &str) -> Result<u64, std::num::ParseIntError> {
    u64::from_str_radix(s.trim_start_matches("0x"), 16)
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = TableConfig {
        path: cli.load,
        checksum: cli.checksum,
    };

    let table = TwoPlusTwo::with_config(&config)?;
    table.verify()?;
    info!("Table checksum 0x{:016x}", table.checksum());

    if cli.check {
        let mut mismatches = 0usize;
        Deck::default().for_each(5, |hand| {
            if table.rank(hand) != Cactus.rank(hand) {
                mismatches += 1;
            }
        });

        if mismatches > 0 {
            bail!("Table disagrees on {mismatches} hands");
        }

        info!("Table agrees on all 5 cards hands");
    }

    if let Some(path) = cli.save {
        table.save(path)?;
    }

    Ok(())
}
