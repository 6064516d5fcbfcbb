// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation errors.
use std::io;
use thiserror::Error;

use crate::{Card, EvalRank};

/// An error returned when the cards passed to an evaluation are not valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The number of cards to evaluate is not supported.
    #[error("Cannot evaluate {count} cards, expected {min} to {max} cards")]
    CardCount {
        /// The number of cards passed.
        count: usize,
        /// Min number of cards.
        min: usize,
        /// Max number of cards.
        max: usize,
    },
    /// The same card appears more than once.
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
}

/// An error returned when a hand ranks table cannot be loaded.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file cannot be read or written.
    #[error("Table I/O error: {0}")]
    Io(#[from] io::Error),
    /// The table data has the wrong size.
    #[error("Table has {found} bytes, expected {expected} bytes")]
    Size {
        /// The size of the data.
        found: usize,
        /// The expected size.
        expected: usize,
    },
    /// The table data doesn't match the configured checksum.
    #[error("Table checksum 0x{found:016x} does not match 0x{expected:016x}")]
    Checksum {
        /// The checksum of the data.
        found: u64,
        /// The configured checksum.
        expected: u64,
    },
    /// The table configuration is not valid.
    #[error("Invalid table configuration {0}")]
    Config(String),
    /// A known hand evaluates to the wrong rank.
    #[error("Table ranks {hand} as {found}, expected {expected}")]
    Content {
        /// The checked hand.
        hand: String,
        /// The rank found in the table.
        found: EvalRank,
        /// The expected rank.
        expected: EvalRank,
    },
}
