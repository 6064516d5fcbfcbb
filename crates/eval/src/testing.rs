// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Test helpers.
use crate::{Card, Rank, Suit};

/// Creates cards from a space separated list like `AS TD 2C`.
pub fn hand(cards: &str) -> Vec<Card> {
    cards
        .split_whitespace()
        .map(|s| {
            let mut chars = s.chars();
            let rank = chars
                .next()
                .and_then(|c| "23456789TJQKA".find(c))
                .map(Rank::from_index);
            let suit = match chars.next() {
                Some('C') => Suit::Clubs,
                Some('D') => Suit::Diamonds,
                Some('H') => Suit::Hearts,
                Some('S') => Suit::Spades,
                _ => panic!("Invalid suit in {s}"),
            };

            match rank {
                Some(rank) => Card::new(rank, suit),
                None => panic!("Invalid rank in {s}"),
            }
        })
        .collect()
}
