// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards perfect hash evaluator.
//!
//! This is a port of [Cactus Kev's][kevlink] evaluator, the 7462 distinct
//! 5-cards hands are ranked using three lookup tables:
//!
//! - `flushes`: indexed by the OR of the rank bits when all cards have the same
//!   suit, gives the rank of flushes and straight flushes.
//! - `unique5`: indexed by the OR of the rank bits when the cards have 5
//!   distinct ranks, gives the rank of straights and high card hands.
//! - `products`: the sorted products of the rank primes of all the other hands
//!   (hands with at least a pair), searched with a binary search, with the
//!   paired `values` ranks.
//!
//! The tables are not shipped, they are built on first use by enumerating all
//! the hand classes and sorting them by strength.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
use std::sync::LazyLock;

use handrank_cards::{Card, Rank, Suit, subsets};

use crate::{EvalRank, Evaluator, HandRank};

/// The number of distinct 5-cards hands.
pub const NUM_CLASSES: usize = EvalRank::NOTHING.value() as usize;

/// Size of the tables indexed by the rank bits, AKQJT = 0x1F00.
const RANK_BITS_SIZE: usize = 0x1F01;

/// Cactus Kev's lookup tables.
struct Tables {
    flushes: Vec<u16>,
    unique5: Vec<u16>,
    products: Vec<u32>,
    values: Vec<u16>,
    /// The ranks of each hand class indexed by the hand rank.
    classes: Vec<[Rank; 5]>,
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::new);

impl Tables {
    fn new() -> Self {
        let mut classes = hand_classes();
        assert_eq!(classes.len(), NUM_CLASSES, "Wrong number of hand classes");

        // Strongest classes first, the first class gets rank 1.
        classes.sort_unstable_by(|a, b| b.cmp(a));

        let mut flushes = vec![0; RANK_BITS_SIZE];
        let mut unique5 = vec![0; RANK_BITS_SIZE];
        let mut products = Vec::with_capacity(NUM_CLASSES);
        let mut ranks = Vec::with_capacity(NUM_CLASSES + 1);

        // Rank 0 is not used.
        ranks.push([Rank::Deuce; 5]);

        for (idx, class) in classes.iter().enumerate() {
            let rank = (idx + 1) as u16;
            if class.flush {
                flushes[class.rank_bits as usize] = rank;
            } else if class.rank_bits.count_ones() == 5 {
                unique5[class.rank_bits as usize] = rank;
            } else {
                products.push((class.product(), rank));
            }

            ranks.push(class.ranks());
        }

        products.sort_unstable();
        let (products, values) = products.into_iter().unzip();

        Self {
            flushes,
            unique5,
            products,
            values,
            classes: ranks,
        }
    }
}

/// A hand equivalence class.
///
/// Fields are in comparison order so that a stronger class compares greater.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct HandClass {
    hand_rank: HandRank,
    /// Ranks ordered by count and then by rank, straights only use the high card.
    key: [u8; 5],
    flush: bool,
    rank_bits: u16,
    counts: [u8; 13],
}

impl HandClass {
    fn new(counts: [u8; 13], flush: bool) -> Self {
        let rank_bits = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .fold(0u16, |bits, (r, _)| bits | (1 << r));

        let mut groups = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(r, c)| (*c, r as u8))
            .collect::<Vec<_>>();
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let mut key = [0u8; 5];
        let mut pos = 0;
        for &(count, rank) in &groups {
            for _ in 0..count {
                key[pos] = rank;
                pos += 1;
            }
        }

        let pattern = groups.iter().map(|(c, _)| *c).collect::<Vec<_>>();
        let straight = straight_high(rank_bits);

        let hand_rank = match (pattern.as_slice(), straight, flush) {
            (_, Some(_), true) => HandRank::StraightFlush,
            (_, None, true) => HandRank::Flush,
            (_, Some(_), false) => HandRank::Straight,
            ([4, 1], _, _) => HandRank::FourOfAKind,
            ([3, 2], _, _) => HandRank::FullHouse,
            ([3, 1, 1], _, _) => HandRank::ThreeOfAKind,
            ([2, 2, 1], _, _) => HandRank::TwoPair,
            ([2, 1, 1, 1], _, _) => HandRank::OnePair,
            ([1, 1, 1, 1, 1], _, _) => HandRank::HighCard,
            _ => panic!("Invalid hand class {counts:?}"),
        };

        if let Some(high) = straight {
            key = [high, 0, 0, 0, 0];
        }

        Self {
            hand_rank,
            key,
            flush,
            rank_bits,
            counts,
        }
    }

    fn product(&self) -> u32 {
        Rank::ranks()
            .map(|r| Card::new(r, Suit::Spades).prime())
            .zip(self.counts)
            .map(|(p, c)| p.pow(c as u32))
            .product()
    }

    fn ranks(&self) -> [Rank; 5] {
        let mut ranks = [Rank::Deuce; 5];
        let mut pos = 0;
        for (r, count) in self.counts.iter().enumerate().rev() {
            for _ in 0..*count {
                ranks[pos] = Rank::from_index(r);
                pos += 1;
            }
        }

        // Order by count, the sort is stable so ranks stay in descending order.
        ranks.sort_by_key(|r| std::cmp::Reverse(self.counts[*r as usize]));
        ranks
    }
}

/// Returns the high card rank of a straight if the rank bits are a straight.
fn straight_high(rank_bits: u16) -> Option<u8> {
    const WHEEL: u16 = 0x100F;

    if rank_bits == WHEEL {
        Some(Rank::Five as u8)
    } else if rank_bits.count_ones() == 5 && rank_bits >> rank_bits.trailing_zeros() == 0x1F {
        Some(15 - rank_bits.leading_zeros() as u8)
    } else {
        None
    }
}

/// Enumerates all the 7462 hand classes.
fn hand_classes() -> Vec<HandClass> {
    let mut classes = Vec::with_capacity(NUM_CLASSES);

    // One flush class for each set of 5 distinct ranks.
    for bits in 0u16..(1 << 13) {
        if bits.count_ones() == 5 {
            let mut counts = [0u8; 13];
            for (r, c) in counts.iter_mut().enumerate() {
                *c = ((bits >> r) & 1) as u8;
            }

            classes.push(HandClass::new(counts, true));
        }
    }

    // One class for each multiset of 5 ranks with at most 4 cards per rank.
    let mut counts = [0u8; 13];
    for_each_multiset(&mut counts, 0, 5, &mut |counts| {
        classes.push(HandClass::new(*counts, false));
    });

    classes
}

fn for_each_multiset<F>(counts: &mut [u8; 13], rank: usize, left: u8, f: &mut F)
where
    F: FnMut(&[u8; 13]),
{
    if left == 0 {
        f(counts);
        return;
    }

    if rank == counts.len() {
        return;
    }

    for n in (0..=left.min(4)).rev() {
        counts[rank] = n;
        for_each_multiset(counts, rank + 1, left - n, f);
    }

    counts[rank] = 0;
}

/// Ranks a 5 cards hand.
#[inline]
pub fn rank5(c0: Card, c1: Card, c2: Card, c3: Card, c4: Card) -> EvalRank {
    let tables = &*TABLES;
    let (i0, i1, i2, i3, i4) = (c0.id(), c1.id(), c2.id(), c3.id(), c4.id());
    let q = ((i0 | i1 | i2 | i3 | i4) >> 16) as usize;

    // Flushes and straight flushes.
    if i0 & i1 & i2 & i3 & i4 & 0xF000 != 0 {
        return EvalRank::new(tables.flushes[q]);
    }

    // Straights and high cards.
    let rank = tables.unique5[q];
    if rank != 0 {
        return EvalRank::new(rank);
    }

    let product = c0.prime() * c1.prime() * c2.prime() * c3.prime() * c4.prime();
    match tables.products.binary_search(&product) {
        Ok(pos) => EvalRank::new(tables.values[pos]),
        Err(_) => panic!("No hand for cards {c0} {c1} {c2} {c3} {c4}"),
    }
}

/// Ranks a hand of 5, 6 or 7 cards, for more than 5 cards this is the best rank
/// of all the 5 cards subsets.
///
/// Panics if the hand doesn't have 5, 6 or 7 cards.
pub fn rank_cards(cards: &[Card]) -> EvalRank {
    match cards {
        [c0, c1, c2, c3, c4] => rank5(*c0, *c1, *c2, *c3, *c4),
        _ => {
            assert!(
                (6..=7).contains(&cards.len()),
                "Cannot rank {} cards",
                cards.len()
            );

            let mut best = EvalRank::INVALID;
            let count = subsets::nck(cards.len(), 5);
            subsets::for_each_ksubset(cards.len(), 5, 0, count, |p| {
                let [c0, c1, c2, c3, c4] = [p[0], p[1], p[2], p[3], p[4]].map(|i| cards[i]);
                best = best.min(rank5(c0, c1, c2, c3, c4));
            });

            best
        }
    }
}

/// The ranks of the hand class for a high rank, ordered by count and then by
/// rank, for example [Ace, Ace, Ace, King, King] for aces full of kings.
///
/// Panics if the rank is not a high rank.
pub fn class_ranks(rank: EvalRank) -> [Rank; 5] {
    assert!(rank.is_high(), "Invalid rank {rank}");
    TABLES.classes[rank.value() as usize]
}

/// The Cactus Kev's evaluator.
///
/// ```
/// # use handrank_eval::*;
/// let royal = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten]
///     .map(|r| Card::new(r, Suit::Spades));
/// assert_eq!(Cactus.rank(&royal), EvalRank::BEST);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Cactus;

impl Evaluator for Cactus {
    fn rank(&self, cards: &[Card]) -> EvalRank {
        rank_cards(cards)
    }
}
