// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown ordering and pot splitting.
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{Eval, EvalRank};

/// The order of a set of hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    indices: Vec<usize>,
    pivot: usize,
}

impl Order {
    /// The hands indices from the weakest to the strongest hand, hands with the
    /// same rank keep their input order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The number of hands tied for the strongest rank at the end of the
    /// indices, zero if there are no hands or none qualifies (no low hands or
    /// a high order of low only hands).
    pub fn pivot(&self) -> usize {
        self.pivot
    }

    /// The indices of the winning hands.
    pub fn winners(&self) -> &[usize] {
        &self.indices[self.indices.len() - self.pivot..]
    }
}

/// Orders the hands by their high or low rank.
///
/// ```
/// # use handrank_eval::*;
/// let cards = Deck::default().into_iter().collect::<Vec<_>>();
/// let evals = [&cards[0..7], &cards[7..14], &cards[14..21]]
///     .into_iter()
///     .map(|hand| Eval::new(&Cactus, &hand[..2], &hand[2..]).unwrap())
///     .collect::<Vec<_>>();
///
/// let order = order(&evals, false);
/// assert_eq!(order.pivot(), 1);
/// assert_eq!(order.winners(), &[1]);
/// ```
pub fn order(evals: &[Eval], low: bool) -> Order {
    let ranks = evals.iter().map(|e| e.rank(low)).collect::<Vec<_>>();
    order_ranks(&ranks)
}

/// Orders ranks from the weakest to the strongest.
pub fn order_ranks(ranks: &[EvalRank]) -> Order {
    let mut indices = (0..ranks.len()).collect::<Vec<_>>();
    indices.sort_by(|&a, &b| ranks[b].cmp(&ranks[a]));

    let pivot = match indices.last() {
        Some(&best) if ranks[best] != EvalRank::INVALID => indices
            .iter()
            .rev()
            .take_while(|&&idx| ranks[idx] == ranks[best])
            .count(),
        _ => 0,
    };

    Order { indices, pivot }
}

/// The result of a showdown with high and optionally low hands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showdown {
    hi: Order,
    lo: Option<Order>,
}

impl Showdown {
    /// Orders the hands for high and, if the game has a low, for low.
    pub fn new(evals: &[Eval], has_low: bool) -> Self {
        Self {
            hi: order(evals, false),
            lo: has_low.then(|| order(evals, true)),
        }
    }

    /// The high hands order.
    pub fn hi(&self) -> &Order {
        &self.hi
    }

    /// The low hands order.
    pub fn lo(&self) -> Option<&Order> {
        self.lo.as_ref()
    }

    /// The indices of the high winners.
    pub fn hi_winners(&self) -> &[usize] {
        self.hi.winners()
    }

    /// The indices of the low winners, empty if no hand qualifies for low.
    pub fn lo_winners(&self) -> &[usize] {
        self.lo.as_ref().map_or(&[][..], |lo| lo.winners())
    }

    /// Checks if one hand wins the whole pot.
    pub fn is_scoop(&self) -> bool {
        match (self.hi_winners(), self.lo_winners()) {
            ([hi], [lo]) => hi == lo,
            ([_], []) | ([], [_]) => true,
            _ => false,
        }
    }

    /// Splits the pot amongst the winners.
    ///
    /// If there are both high and low winners the pot is split in half with
    /// the odd chip to the high, otherwise the high or low winners take the
    /// whole pot. Each share is split evenly with the remaining chips given
    /// one each to the winners in order. Returns the hand index and amount for
    /// each winner ordered by index.
    pub fn split_pot(&self, amount: u64) -> Vec<(usize, u64)> {
        let mut payoffs = AHashMap::new();

        let (hi, lo) = (self.hi_winners(), self.lo_winners());
        let (hi_amount, lo_amount) = match (hi.is_empty(), lo.is_empty()) {
            (false, false) => (amount - amount / 2, amount / 2),
            (true, false) => (0, amount),
            _ => (amount, 0),
        };

        for (winners, amount) in [(hi, hi_amount), (lo, lo_amount)] {
            if winners.is_empty() {
                continue;
            }

            let share = amount / winners.len() as u64;
            let odd = (amount % winners.len() as u64) as usize;
            for (pos, &idx) in winners.iter().enumerate() {
                let chips = share + u64::from(pos < odd);
                *payoffs.entry(idx).or_insert(0) += chips;
            }
        }

        let mut payoffs = payoffs.into_iter().collect::<Vec<_>>();
        payoffs.sort_unstable();
        payoffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cactus, HandRank, Low, testing::hand};
    use handrank_cards::Deck;
    use rand::{SeedableRng, rngs::SmallRng};

    fn ranks(values: &[u16]) -> Vec<EvalRank> {
        values.iter().copied().map(EvalRank::new).collect()
    }

    #[test]
    fn single_winner() {
        // Four hands with the same rank and one better hand.
        let order = order_ranks(&ranks(&[2000, 2000, 100, 2000, 2000]));
        assert_eq!(order.indices(), &[0, 1, 3, 4, 2]);
        assert_eq!(order.pivot(), 1);
        assert_eq!(order.winners(), &[2]);
    }

    #[test]
    fn tied_winners() {
        let order = order_ranks(&ranks(&[300, 5000, 300, 6000]));
        assert_eq!(order.indices(), &[3, 1, 0, 2]);
        assert_eq!(order.pivot(), 2);
        assert_eq!(order.winners(), &[0, 2]);
    }

    #[test]
    fn no_hands() {
        let order = order_ranks(&[]);
        assert!(order.indices().is_empty());
        assert_eq!(order.pivot(), 0);
        assert!(order.winners().is_empty());
    }

    #[test]
    fn no_qualifying_low() {
        let order = order_ranks(&[EvalRank::INVALID, EvalRank::INVALID]);
        assert_eq!(order.pivot(), 0);
        assert!(order.winners().is_empty());

        let order = order_ranks(&[EvalRank::INVALID, EvalRank::new(40), EvalRank::INVALID]);
        assert_eq!(order.indices(), &[0, 2, 1]);
        assert_eq!(order.pivot(), 1);
    }

    #[test]
    fn hi_lo_showdown() {
        let board = hand("2C 7D 8H KS 4C");
        let pockets = [
            // Low with 7-4-3-2-A.
            hand("AH 3S"),
            // Two pair, no low.
            hand("KC 8S"),
            // Same low as the first hand.
            hand("AD 3H"),
        ];

        let evals = pockets
            .iter()
            .map(|p| Eval::with_low(&Cactus, Low::EightOrBetter, p, &board).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(evals[1].hi_rank().hand_rank(), HandRank::TwoPair);
        assert_eq!(evals[1].lo_rank(), EvalRank::INVALID);

        let showdown = Showdown::new(&evals, true);
        assert_eq!(showdown.hi_winners(), &[1]);
        assert_eq!(showdown.lo_winners(), &[0, 2]);
        assert!(!showdown.is_scoop());

        assert_eq!(showdown.split_pot(101), vec![(0, 25), (1, 51), (2, 25)]);
        assert_eq!(showdown.split_pot(103), vec![(0, 26), (1, 52), (2, 25)]);
    }

    #[test]
    fn scoop() {
        let board = hand("2C 7D 9H KS QC");
        let pockets = [hand("KC 8S"), hand("TH JS")];

        let evals = pockets
            .iter()
            .map(|p| Eval::with_low(&Cactus, Low::EightOrBetter, p, &board).unwrap())
            .collect::<Vec<_>>();

        let showdown = Showdown::new(&evals, true);
        assert_eq!(showdown.hi_winners(), &[1]);
        assert!(showdown.lo_winners().is_empty());
        assert_eq!(showdown.lo().map(Order::pivot), Some(0));
        assert!(showdown.is_scoop());
        assert_eq!(showdown.split_pot(75), vec![(1, 75)]);
    }

    #[test]
    fn high_only_split() {
        let order = order_ranks(&ranks(&[10, 10, 10]));
        let showdown = Showdown {
            hi: order,
            lo: None,
        };

        assert!(!showdown.is_scoop());
        assert_eq!(showdown.split_pot(10), vec![(0, 4), (1, 3), (2, 3)]);
        assert_eq!(showdown.split_pot(0), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn badugi_showdown() {
        let pockets = [
            hand("AS 2H 3D 4C"),
            hand("AH 2S 3C 5D"),
            hand("KS KH QS JD"),
        ];

        let evals = pockets
            .iter()
            .map(|p| Eval::low_only(Low::Badugi, p, &[]).unwrap())
            .collect::<Vec<_>>();

        let showdown = Showdown::new(&evals, true);
        assert_eq!(showdown.hi().pivot(), 0);
        assert!(showdown.hi_winners().is_empty());
        assert_eq!(showdown.lo().map(Order::indices), Some(&[2, 1, 0][..]));
        assert_eq!(showdown.lo_winners(), &[0]);
        assert!(showdown.is_scoop());
        assert_eq!(showdown.split_pot(100), vec![(0, 100)]);

        // Two four cards badugi with the same ranks split the pot.
        let pockets = [
            hand("AS 2H 3D 4C"),
            hand("KS KH QS JD"),
            hand("AD 2C 3H 4S"),
        ];

        let evals = pockets
            .iter()
            .map(|p| Eval::low_only(Low::Badugi, p, &[]).unwrap())
            .collect::<Vec<_>>();

        let showdown = Showdown::new(&evals, true);
        assert_eq!(showdown.lo_winners(), &[0, 2]);
        assert!(!showdown.is_scoop());
        assert_eq!(showdown.split_pot(101), vec![(0, 51), (2, 50)]);
    }

    #[test]
    fn sampled_pivots() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut hands = Vec::new();
        Deck::default().sample(&mut rng, 6_000, 7, |cards| hands.push(cards.to_vec()));

        for table in hands.chunks(6) {
            let evals = table
                .iter()
                .map(|c| Eval::with_low(&Cactus, Low::EightOrBetter, &c[..2], &c[2..]).unwrap())
                .collect::<Vec<_>>();

            let hi = order(&evals, false);
            let best = evals.iter().map(Eval::hi_rank).min().unwrap();
            assert!(hi.pivot() >= 1);
            assert_eq!(hi.pivot(), evals.iter().filter(|e| e.hi_rank() == best).count());
            assert!(hi.winners().iter().all(|&idx| evals[idx].hi_rank() == best));

            let lo = order(&evals, true);
            let no_low = evals.iter().all(|e| e.lo_rank() == EvalRank::INVALID);
            assert_eq!(lo.pivot() == 0, no_low);
            if !no_low {
                let best = evals.iter().map(Eval::lo_rank).min().unwrap();
                assert!(lo.winners().iter().all(|&idx| evals[idx].lo_rank() == best));
            }

            let mut indices = hi.indices().to_vec();
            indices.sort_unstable();
            assert!(indices.iter().copied().eq(0..evals.len()));
        }
    }
}
