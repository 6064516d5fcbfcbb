// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand evaluators.
use crate::{Card, EvalRank, cactus};

#[cfg(feature = "twoplustwo")]
use crate::TwoPlusTwo;

/// A hand evaluator for 5, 6, and 7 cards hands.
///
/// All evaluators return the same rank for the same cards, so ranks from
/// different evaluators can be compared. Cards must be distinct, evaluators
/// don't check for duplicates.
pub trait Evaluator: Send + Sync {
    /// Ranks the hand.
    ///
    /// Panics if the hand doesn't have 5, 6, or 7 cards.
    fn rank(&self, cards: &[Card]) -> EvalRank;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    #[inline]
    fn rank(&self, cards: &[Card]) -> EvalRank {
        (**self).rank(cards)
    }
}

/// Uses the fastest evaluator for the number of cards.
///
/// Five cards hands are ranked with the perfect hash evaluator and larger hands
/// with the lookup table when the `twoplustwo` feature is enabled.
#[derive(Debug, Clone, Copy)]
pub struct Hybrid {
    #[cfg(feature = "twoplustwo")]
    table: &'static TwoPlusTwo,
}

impl Hybrid {
    /// Creates an evaluator that uses the process wide table.
    ///
    /// See [TwoPlusTwo::global] for how the table is initialized.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "twoplustwo")]
            table: TwoPlusTwo::global(),
        }
    }

    /// Creates an evaluator with the given table.
    #[cfg(feature = "twoplustwo")]
    pub fn with_table(table: &'static TwoPlusTwo) -> Self {
        Self { table }
    }
}

impl Default for Hybrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for Hybrid {
    #[inline]
    fn rank(&self, cards: &[Card]) -> EvalRank {
        debug_assert!(
            cards
                .iter()
                .enumerate()
                .all(|(i, c)| !cards[i + 1..].contains(c)),
            "Duplicate cards {cards:?}"
        );

        #[cfg(feature = "twoplustwo")]
        if cards.len() > 5 {
            return self.table.rank_cards(cards);
        }

        cactus::rank_cards(cards)
    }
}

/// Ranks a hand using the [Hybrid] evaluator.
///
/// ```
/// # use handrank_eval::*;
/// let cards = Deck::default().into_iter().take(7).collect::<Vec<_>>();
/// assert_eq!(rank(&cards), Cactus.rank(&cards));
/// ```
pub fn rank(cards: &[Card]) -> EvalRank {
    Hybrid::new().rank(cards)
}
