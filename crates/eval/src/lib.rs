// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Handrank poker hand evaluator.
//!
//! Ranks poker hands of 5, 6, and 7 cards. A hand rank is an [EvalRank] where
//! lower values are stronger hands, the best hand is a royal flush with rank 1.
//!
//! There are two evaluators that return the same ranks:
//!
//! - [Cactus]: a port of the [Cactus Kev's][kevlink] perfect hash evaluator for
//!   5 cards hands, larger hands are ranked as the best of their 5 cards subsets.
//! - [TwoPlusTwo]: an incremental lookup table that ranks a hand with one lookup
//!   per card, its 32M entries table is generated or loaded on startup (requires
//!   the `twoplustwo` feature, enabled by default).
//!
//! and a [Hybrid] evaluator that uses the fastest one for the number of cards:
//!
//! ```
//! # use handrank_eval::*;
//! // 2C, 3C, .., JC
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let r1 = Cactus.rank(&cards[0..5]);
//! let r2 = Cactus.rank(&cards[5..]);
//! assert!(r2.beats(r1));
//! assert_eq!(r2.hand_rank(), HandRank::StraightFlush);
//! ```
//!
//! An [Eval] holds the high and low ranks of a player hand with the cards that
//! make them, and [order] sorts evaluated hands to find the winners:
//!
//! ```
//! # use handrank_eval::*;
//! let deck = Deck::default().into_iter().collect::<Vec<_>>();
//! let board = &deck[10..15];
//! let evals = [&deck[0..2], &deck[20..22]]
//!     .iter()
//!     .map(|pocket| Eval::with_low(&Cactus, Low::EightOrBetter, pocket, board))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let showdown = Showdown::new(&evals, true);
//! assert_eq!(showdown.hi_winners(), &[0]);
//! ```
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod best;
pub mod cactus;
mod error;
mod eval;
mod evaluator;
pub mod low;
mod order;
mod rank;
#[cfg(test)]
mod testing;
#[cfg(feature = "twoplustwo")]
pub mod twoplustwo;

pub use best::best_five;
pub use cactus::Cactus;
pub use error::{EvalError, TableError};
pub use eval::Eval;
pub use evaluator::{Evaluator, Hybrid, rank};
pub use low::{Low, split_eval};
pub use order::{Order, Showdown, order, order_ranks};
pub use rank::{EvalRank, HandRank};
#[cfg(feature = "twoplustwo")]
pub use twoplustwo::{TableConfig, TwoPlusTwo};

// Reexport cards types.
pub use handrank_cards::{Card, Deck, Rank, Suit};
