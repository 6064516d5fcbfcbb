// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand evaluation results.
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::{Card, EvalError, EvalRank, Evaluator, Low, best_five};

/// The number of cards in a high hand.
const HAND_CARDS: RangeInclusive<usize> = 5..=7;

/// The number of cards in a low only badugi hand.
const BADUGI_CARDS: RangeInclusive<usize> = 4..=7;

/// The evaluation of a player hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eval {
    hi_rank: EvalRank,
    hi_best: Vec<Card>,
    hi_unused: Vec<Card>,
    low: Option<LowEval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LowEval {
    scheme: Low,
    rank: EvalRank,
    best: Vec<Card>,
    unused: Vec<Card>,
}

impl LowEval {
    fn new(scheme: Low, cards: &[Card]) -> Self {
        let (rank, best, unused) = scheme
            .best(cards)
            .unwrap_or((EvalRank::INVALID, Vec::new(), Vec::new()));

        Self {
            scheme,
            rank,
            best,
            unused,
        }
    }
}

impl Eval {
    /// Evaluates the high hand of the pocket and board cards.
    ///
    /// ```
    /// # use handrank_eval::*;
    /// let cards = Deck::default().into_iter().take(7).collect::<Vec<_>>();
    /// let eval = Eval::new(&Cactus, &cards[..2], &cards[2..]).unwrap();
    /// assert_eq!(eval.hi_rank().hand_rank(), HandRank::StraightFlush);
    /// assert_eq!(eval.hi_best().len(), 5);
    /// assert_eq!(eval.lo_rank(), EvalRank::INVALID);
    /// ```
    pub fn new<E: Evaluator>(hi: &E, pocket: &[Card], board: &[Card]) -> Result<Self, EvalError> {
        let cards = checked_cards(pocket, board, HAND_CARDS)?;
        Ok(Self::eval_hi(hi, &cards))
    }

    /// Evaluates the high and low hands of the pocket and board cards.
    pub fn with_low<E: Evaluator>(
        hi: &E,
        low: Low,
        pocket: &[Card],
        board: &[Card],
    ) -> Result<Self, EvalError> {
        let cards = checked_cards(pocket, board, HAND_CARDS)?;
        let mut eval = Self::eval_hi(hi, &cards);
        eval.low = Some(LowEval::new(low, &cards));
        Ok(eval)
    }

    /// Evaluates only the low hand of the pocket and board cards, for games
    /// like badugi that have no high hand.
    ///
    /// Badugi hands have from 4 to 7 cards, the other schemes from 5 to 7. The
    /// high rank is [EvalRank::INVALID] and the high cards are empty.
    ///
    /// ```
    /// # use handrank_eval::*;
    /// let pocket = [
    ///     Card::new(Rank::Ace, Suit::Spades),
    ///     Card::new(Rank::Deuce, Suit::Hearts),
    ///     Card::new(Rank::Trey, Suit::Diamonds),
    ///     Card::new(Rank::Four, Suit::Clubs),
    /// ];
    ///
    /// let eval = Eval::low_only(Low::Badugi, &pocket, &[]).unwrap();
    /// assert_eq!(eval.hi_rank(), EvalRank::INVALID);
    /// assert_eq!(eval.lo_best().len(), 4);
    /// ```
    pub fn low_only(low: Low, pocket: &[Card], board: &[Card]) -> Result<Self, EvalError> {
        let counts = if low == Low::Badugi {
            BADUGI_CARDS
        } else {
            HAND_CARDS
        };

        let cards = checked_cards(pocket, board, counts)?;
        Ok(Self {
            hi_rank: EvalRank::INVALID,
            hi_best: Vec::new(),
            hi_unused: Vec::new(),
            low: Some(LowEval::new(low, &cards)),
        })
    }

    fn eval_hi<E: Evaluator>(hi: &E, cards: &[Card]) -> Self {
        let hi_rank = hi.rank(cards);
        let (hi_best, hi_unused) = best_five(cards, hi_rank.hand_rank());

        Self {
            hi_rank,
            hi_best,
            hi_unused,
            low: None,
        }
    }

    /// The high hand rank, [EvalRank::INVALID] for a low only hand.
    pub fn hi_rank(&self) -> EvalRank {
        self.hi_rank
    }

    /// The five cards that make the high hand.
    pub fn hi_best(&self) -> &[Card] {
        &self.hi_best
    }

    /// The cards that are not part of the high hand.
    pub fn hi_unused(&self) -> &[Card] {
        &self.hi_unused
    }

    /// The low scheme if this hand has been evaluated for low.
    pub fn low(&self) -> Option<Low> {
        self.low.as_ref().map(|l| l.scheme)
    }

    /// The low hand rank, [EvalRank::INVALID] if there is no qualifying low.
    pub fn lo_rank(&self) -> EvalRank {
        self.low.as_ref().map_or(EvalRank::INVALID, |l| l.rank)
    }

    /// The cards that make the low hand, empty if there is no qualifying low.
    pub fn lo_best(&self) -> &[Card] {
        self.low.as_ref().map_or(&[][..], |l| &l.best[..])
    }

    /// The cards that are not part of the low hand.
    pub fn lo_unused(&self) -> &[Card] {
        self.low.as_ref().map_or(&[][..], |l| &l.unused[..])
    }

    /// The rank used for high or low ordering.
    pub fn rank(&self, low: bool) -> EvalRank {
        if low { self.lo_rank() } else { self.hi_rank }
    }
}

/// Joins the cards checking their number and that there are no duplicates.
fn checked_cards(
    pocket: &[Card],
    board: &[Card],
    counts: RangeInclusive<usize>,
) -> Result<Vec<Card>, EvalError> {
    let count = pocket.len() + board.len();
    if !counts.contains(&count) {
        return Err(EvalError::CardCount {
            count,
            min: *counts.start(),
            max: *counts.end(),
        });
    }

    let mut seen = 0u64;
    let mut cards = Vec::with_capacity(count);
    for &card in pocket.iter().chain(board) {
        let bit = 1u64 << card.slot();
        if seen & bit != 0 {
            return Err(EvalError::DuplicateCard(card));
        }

        seen |= bit;
        cards.push(card);
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cactus, HandRank, Hybrid, testing::hand};
    use handrank_cards::{Rank, Suit};

    #[test]
    fn quads_with_board() {
        let pocket = hand("AS AC");
        let board = hand("AD AH KD 2D 3C");

        let eval = Eval::new(&Hybrid::new(), &pocket, &board).unwrap();
        assert_eq!(eval.hi_rank().hand_rank(), HandRank::FourOfAKind);
        assert_eq!(eval.hi_best(), hand("AC AD AH AS KD"));
        assert_eq!(eval.hi_unused(), hand("3C 2D"));
        assert_eq!(eval.low(), None);
        assert_eq!(eval.lo_rank(), EvalRank::INVALID);
        assert!(eval.lo_best().is_empty());
    }

    #[test]
    fn hi_lo() {
        let pocket = hand("AH 2S");
        let board = hand("7C 4H 5D KC KS");

        let eval = Eval::with_low(&Cactus, Low::EightOrBetter, &pocket, &board).unwrap();
        assert_eq!(eval.hi_rank().hand_rank(), HandRank::OnePair);
        assert_eq!(eval.low(), Some(Low::EightOrBetter));
        assert!(eval.lo_rank().is_valid());
        assert_eq!(eval.lo_best(), hand("7C 5D 4H 2S AH"));
        assert_eq!(eval.lo_unused(), hand("KC KS"));
        assert_eq!(eval.rank(true), eval.lo_rank());
        assert_eq!(eval.rank(false), eval.hi_rank());

        // No low with three high cards on the board.
        let board = hand("9C 4H TD KC KS");
        let eval = Eval::with_low(&Cactus, Low::EightOrBetter, &pocket, &board).unwrap();
        assert_eq!(eval.low(), Some(Low::EightOrBetter));
        assert_eq!(eval.lo_rank(), EvalRank::INVALID);
        assert!(eval.lo_best().is_empty());
        assert!(eval.lo_unused().is_empty());
    }

    #[test]
    fn invalid_cards() {
        let pocket = hand("AH 2S");
        let board = hand("7C 4H");
        assert_eq!(
            Eval::new(&Cactus, &pocket, &board),
            Err(EvalError::CardCount {
                count: 4,
                min: 5,
                max: 7
            })
        );

        let board = hand("7C 4H AH");
        assert_eq!(
            Eval::new(&Cactus, &pocket, &board),
            Err(EvalError::DuplicateCard(Card::new(Rank::Ace, Suit::Hearts)))
        );

        let board = hand("7C 7C 7C 7C 7C 7C");
        assert!(matches!(
            Eval::with_low(&Cactus, Low::AceFive, &pocket, &board),
            Err(EvalError::CardCount { count: 8, .. })
        ));
    }

    #[test]
    fn badugi_low_only() {
        let eval = Eval::low_only(Low::Badugi, &hand("AS 2H"), &hand("3D 4C")).unwrap();
        assert_eq!(eval.hi_rank(), EvalRank::INVALID);
        assert!(eval.hi_best().is_empty());
        assert!(eval.hi_unused().is_empty());
        assert_eq!(eval.low(), Some(Low::Badugi));
        assert_eq!(eval.lo_rank(), EvalRank::new(16));
        assert_eq!(eval.lo_best(), hand("4C 3D 2H AS"));
        assert!(eval.lo_unused().is_empty());

        // Two cards badugi with a paired rank and a paired suit.
        let eval = Eval::low_only(Low::Badugi, &hand("KS KH 9D 5D"), &[]).unwrap();
        assert_eq!(eval.lo_best(), hand("KS 5D"));
        assert_eq!(eval.lo_unused(), hand("KH 9D"));
        assert_eq!(eval.lo_rank(), crate::low::rank_badugi(&hand("KS KH 9D 5D")));

        assert_eq!(
            Eval::low_only(Low::Badugi, &hand("AS 2H 3D"), &[]),
            Err(EvalError::CardCount {
                count: 3,
                min: 4,
                max: 7
            })
        );
        assert!(matches!(
            Eval::low_only(Low::AceFive, &hand("AS 2H 3D 4C"), &[]),
            Err(EvalError::CardCount { count: 4, min: 5, .. })
        ));

        let eval = Eval::low_only(Low::AceFive, &hand("AS 2H 3D 4C"), &hand("5C")).unwrap();
        assert_eq!(eval.lo_rank(), EvalRank::BEST);
        assert_eq!(eval.hi_rank(), EvalRank::INVALID);
    }
}
