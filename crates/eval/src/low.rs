// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Low hands.
//!
//! Low ranks use the same convention as high ranks, a lower value is a better
//! hand and [EvalRank::INVALID] is a hand that doesn't qualify. The low schemes
//! are:
//!
//! - [Low::AceFive]: aces are low, straights and flushes don't count, pairs
//!   count against the hand. The best hand is 5-4-3-2-A with rank 1.
//! - [Low::EightOrBetter]: same as ace to five but only hands with five
//!   distinct cards eight or lower qualify.
//! - [Low::Badugi]: the largest set of cards, up to four, with distinct ranks
//!   and suits, aces are low. Four cards beat three cards and so on.
//! - [Low::DeuceSeven]: aces are always high, straights and flushes count
//!   against the hand. The best hand is 7-5-4-3-2 with rank 1 and A-5-4-3-2
//!   is an ace high hand, or an ace high flush if suited.
use serde::{Deserialize, Serialize};
use std::{cmp::Reverse, sync::LazyLock};

use crate::{Card, EvalRank, Evaluator, HandRank, Rank, cactus};
use handrank_cards::subsets;

/// The worst eight or better hand, 8-7-6-5-4.
pub const EIGHT_OR_BETTER_MAX: EvalRank = EvalRank::new(56);

/// The number of distinct ace to five hands.
pub const NUM_ACE_FIVE: usize = 6175;

/// Ace to five low ranks indexed by high rank.
static ACE_FIVE: LazyLock<Vec<u16>> = LazyLock::new(|| {
    let keys = (1..=EvalRank::NOTHING.value())
        .map(|r| ace_five_key(EvalRank::new(r)))
        .collect::<Vec<_>>();

    let mut sorted = keys.clone();
    sorted.sort_unstable();
    sorted.dedup();

    let mut table = vec![0u16; keys.len() + 1];
    for (rank, key) in keys.iter().enumerate() {
        if let Ok(pos) = sorted.binary_search(key) {
            table[rank + 1] = (pos + 1) as u16;
        }
    }

    table
});

/// Deuce to seven low ranks indexed by high rank.
static DEUCE_SEVEN: LazyLock<Vec<u16>> = LazyLock::new(|| {
    let keys = (1..=EvalRank::NOTHING.value())
        .map(|r| deuce_seven_key(EvalRank::new(r)))
        .collect::<Vec<_>>();

    // The weakest high hand is the best low.
    let mut weakest = (0..keys.len()).collect::<Vec<_>>();
    weakest.sort_unstable_by_key(|&idx| keys[idx]);

    let mut table = vec![0u16; keys.len() + 1];
    for (pos, idx) in weakest.into_iter().enumerate() {
        table[idx + 1] = (pos + 1) as u16;
    }

    table
});

/// Orders the values by count and then by value, both descending, returns
/// the groups counts and the ordered values.
fn group_values(values: impl Iterator<Item = u8>) -> (Vec<u8>, [u8; 5]) {
    let mut counts = [0u8; Rank::COUNT];
    for v in values {
        counts[v as usize] += 1;
    }

    let mut groups = counts
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0)
        .map(|(v, c)| (*c, v as u8))
        .collect::<Vec<_>>();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut ordered = [0u8; 5];
    let mut pos = 0;
    for &(count, value) in &groups {
        for _ in 0..count {
            ordered[pos] = value;
            pos += 1;
        }
    }

    (groups.into_iter().map(|(c, _)| c).collect(), ordered)
}

/// Ace to five ordering key, lower is better: the pattern of the hand (no pair,
/// pair, two pair, trips, full house, quads) and then the ace low values
/// ordered by count and then by value.
fn ace_five_key(rank: EvalRank) -> (u8, [u8; 5]) {
    let ranks = cactus::class_ranks(rank);
    let (counts, values) = group_values(ranks.iter().map(|r| r.ace_low()));

    let pattern = match counts.as_slice() {
        [1, 1, 1, 1, 1] => 0,
        [2, 1, 1, 1] => 1,
        [2, 2, 1] => 2,
        [3, 1, 1] => 3,
        [3, 2] => 4,
        _ => 5,
    };

    (pattern, values)
}

/// A-5-4-3-2 values ordered by count and value with aces high.
const WHEEL: [u8; 5] = [
    Rank::Ace as u8,
    Rank::Five as u8,
    Rank::Four as u8,
    Rank::Trey as u8,
    Rank::Deuce as u8,
];

/// Deuce to seven ordering key, higher is a stronger high hand: the category
/// and the values ordered by count and then by value. A-5-4-3-2 is not a
/// straight when aces are high.
fn deuce_seven_key(rank: EvalRank) -> (HandRank, [u8; 5]) {
    let ranks = cactus::class_ranks(rank);
    let (_, values) = group_values(ranks.iter().map(|&r| r as u8));

    let hand_rank = match rank.hand_rank() {
        HandRank::StraightFlush if values == WHEEL => HandRank::Flush,
        HandRank::Straight if values == WHEEL => HandRank::HighCard,
        hand_rank => hand_rank,
    };

    (hand_rank, values)
}

/// Calls `f` for each 5 cards subset and returns the min value.
fn min_over_fives<F>(cards: &[Card], mut f: F) -> u16
where
    F: FnMut(Card, Card, Card, Card, Card) -> u16,
{
    assert!(
        (5..=7).contains(&cards.len()),
        "Cannot rank {} cards",
        cards.len()
    );

    let mut best = u16::MAX;
    let count = subsets::nck(cards.len(), 5);
    subsets::for_each_ksubset(cards.len(), 5, 0, count, |p| {
        let [c0, c1, c2, c3, c4] = [p[0], p[1], p[2], p[3], p[4]].map(|i| cards[i]);
        best = best.min(f(c0, c1, c2, c3, c4));
    });

    best
}

/// The ace to five rank of the best 5 cards.
///
/// Panics if there are less than 5 or more than 7 cards.
pub fn rank_ace_five(cards: &[Card]) -> EvalRank {
    let table = &*ACE_FIVE;
    EvalRank::new(min_over_fives(cards, |c0, c1, c2, c3, c4| {
        table[cactus::rank5(c0, c1, c2, c3, c4).value() as usize]
    }))
}

/// The eight or better rank of the best 5 cards, [EvalRank::INVALID] if the
/// hand doesn't qualify.
///
/// Panics if there are less than 5 or more than 7 cards.
pub fn rank_eight_or_better(cards: &[Card]) -> EvalRank {
    let rank = rank_ace_five(cards);
    if rank <= EIGHT_OR_BETTER_MAX {
        rank
    } else {
        EvalRank::INVALID
    }
}

/// The deuce to seven rank of the best 5 cards.
///
/// Panics if there are less than 5 or more than 7 cards.
pub fn rank_lowball(cards: &[Card]) -> EvalRank {
    let table = &*DEUCE_SEVEN;
    EvalRank::new(min_over_fives(cards, |c0, c1, c2, c3, c4| {
        table[cactus::rank5(c0, c1, c2, c3, c4).value() as usize]
    }))
}

/// The badugi rank of the cards, [EvalRank::INVALID] for no cards.
///
/// Panics if there are more than 7 cards.
pub fn rank_badugi(cards: &[Card]) -> EvalRank {
    match badugi_subset(cards) {
        Some((value, _)) => EvalRank::new(value),
        None => EvalRank::INVALID,
    }
}

/// Finds the best badugi subset, returns its rank and the subset bits.
fn badugi_subset(cards: &[Card]) -> Option<(u16, u32)> {
    assert!(cards.len() <= subsets::MAX_K, "Too many cards {}", cards.len());

    let mut best: Option<(u16, u32)> = None;
    for bits in 1u32..(1 << cards.len()) {
        let count = bits.count_ones();
        if count > 4 {
            continue;
        }

        let mut ranks = 0u16;
        let mut suits = 0u8;
        let mut valid = true;
        for (pos, card) in cards.iter().enumerate() {
            if bits & (1 << pos) != 0 {
                let rank = 1u16 << card.rank().ace_low();
                valid &= ranks & rank == 0 && suits & card.suit_bits() == 0;
                ranks |= rank;
                suits |= card.suit_bits();
            }
        }

        if valid {
            let value = (((4 - count as u16) << 13) | ranks) + 1;
            if best.is_none_or(|(v, _)| value < v) {
                best = Some((value, bits));
            }
        }
    }

    best
}

/// A low hand scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Low {
    /// Ace to five lowball.
    AceFive,
    /// Ace to five with an eight or better qualifier.
    EightOrBetter,
    /// Four cards badugi.
    Badugi,
    /// Deuce to seven lowball.
    DeuceSeven,
}

impl Low {
    /// Ranks the cards with this low scheme.
    pub fn rank(self, cards: &[Card]) -> EvalRank {
        match self {
            Low::AceFive => rank_ace_five(cards),
            Low::EightOrBetter => rank_eight_or_better(cards),
            Low::Badugi => rank_badugi(cards),
            Low::DeuceSeven => rank_lowball(cards),
        }
    }

    /// Returns the low rank, the cards that make the best low and the unused
    /// cards, or none if the cards don't make a qualifying low.
    ///
    /// Cards are ordered from the highest to the lowest, with aces low for the
    /// ace to five and badugi schemes.
    pub fn best(self, cards: &[Card]) -> Option<(EvalRank, Vec<Card>, Vec<Card>)> {
        let (rank, mut best, mut unused) = match self {
            Low::AceFive | Low::EightOrBetter => {
                let target = self.rank(cards);
                if target == EvalRank::INVALID {
                    return None;
                }

                let (best, unused) = find_split(cards, |five| rank_ace_five(five) == target)?;
                (target, best, unused)
            }
            Low::DeuceSeven => {
                let target = rank_lowball(cards);
                let (best, unused) = find_split(cards, |five| rank_lowball(five) == target)?;
                (target, best, unused)
            }
            Low::Badugi => {
                let (value, bits) = badugi_subset(cards)?;
                let (mut best, mut unused) = (Vec::new(), Vec::new());
                for (pos, card) in cards.iter().enumerate() {
                    if bits & (1 << pos) != 0 {
                        best.push(*card);
                    } else {
                        unused.push(*card);
                    }
                }

                (EvalRank::new(value), best, unused)
            }
        };

        if self == Low::DeuceSeven {
            best.sort_by(|a, b| b.cmp(a));
            unused.sort_by(|a, b| b.cmp(a));
        } else {
            best.sort_by_key(|c| Reverse((c.rank().ace_low(), c.suit())));
            unused.sort_by_key(|c| Reverse((c.rank().ace_low(), c.suit())));
        }

        Some((rank, best, unused))
    }
}

/// Finds the first 5 cards subset that satisfies the predicate.
fn find_split<F>(cards: &[Card], mut pred: F) -> Option<(Vec<Card>, Vec<Card>)>
where
    F: FnMut(&[Card]) -> bool,
{
    let mut found = None;
    subsets::for_each_split(cards, 5, |five, rest| {
        if found.is_none() && pred(five) {
            found = Some((five.to_vec(), rest.to_vec()));
        }
    });

    found
}

/// Ranks the pocket and board cards for high and low.
///
/// Returns the high rank and the low rank, the low rank is invalid if there is
/// no low scheme or if the cards don't make a qualifying low.
pub fn split_eval<E: Evaluator>(
    hi: &E,
    low: Option<Low>,
    pocket: &[Card],
    board: &[Card],
) -> (EvalRank, EvalRank) {
    let cards = pocket.iter().chain(board).copied().collect::<Vec<_>>();
    let hi_rank = hi.rank(&cards);
    let lo_rank = low.map_or(EvalRank::INVALID, |low| low.rank(&cards));
    (hi_rank, lo_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cactus, testing::hand};
    use handrank_cards::Deck;
    use rand::{SeedableRng, rngs::SmallRng};

    #[test]
    fn ace_five_table() {
        let table = &*ACE_FIVE;
        let max = table[1..].iter().copied().max().unwrap();
        assert_eq!(max as usize, NUM_ACE_FIVE);
        assert!(table[1..].iter().all(|&r| r > 0));

        let mut seen = vec![false; NUM_ACE_FIVE + 1];
        for &r in &table[1..] {
            seen[r as usize] = true;
        }
        assert!(seen[1..].iter().all(|s| *s));
    }

    #[test]
    fn ace_five_hands() {
        let wheel = hand("5H 4H 3H 2H AH");
        assert_eq!(rank_ace_five(&wheel), EvalRank::new(1));

        let six_four = hand("6H 4C 3H 2H AH");
        assert_eq!(rank_ace_five(&six_four), EvalRank::new(2));

        let eight_high = hand("8C 7H 6H 5S 4H");
        assert_eq!(rank_ace_five(&eight_high), EIGHT_OR_BETTER_MAX);

        // The best pair is worse than the worst no pair hand.
        let aces = hand("AC AH 3H 2S 4H");
        assert_eq!(rank_ace_five(&aces), EvalRank::new(1288));

        let quads = hand("KC KH KS KD QH");
        assert_eq!(rank_ace_five(&quads), EvalRank::new(NUM_ACE_FIVE as u16));
    }

    #[test]
    fn eight_or_better() {
        let wheel = hand("5H 4H 3H 2H AH");
        let nine = hand("9H 7H 6H 5H 4H");
        let wheel_rank = rank_eight_or_better(&wheel);
        assert!(wheel_rank.is_valid());
        assert_eq!(rank_eight_or_better(&nine), EvalRank::INVALID);
        assert!(wheel_rank.beats(rank_eight_or_better(&nine)));
        assert!(rank_ace_five(&wheel).beats(rank_ace_five(&nine)));

        // Best of seven cards.
        let cards = hand("KC KH AS 2D 8H 3C 4S");
        let eight_four = hand("8H 4S 3C 2D AS");
        assert_eq!(rank_eight_or_better(&cards), rank_ace_five(&eight_four));

        let (rank, best, unused) = Low::EightOrBetter.best(&cards).unwrap();
        assert_eq!(rank, rank_eight_or_better(&cards));
        assert_eq!(best, eight_four);
        assert_eq!(unused, hand("KC KH"));

        let no_low = hand("KC KH AS AD 9H 3C 4S");
        assert_eq!(rank_eight_or_better(&no_low), EvalRank::INVALID);
        assert_eq!(Low::EightOrBetter.best(&no_low), None);
    }

    #[test]
    fn badugi() {
        let best = hand("AS 2H 3D 4C");
        assert_eq!(rank_badugi(&best), EvalRank::new(16));

        let three = hand("AS AH 2D 3C");
        assert_eq!(rank_badugi(&three), EvalRank::new((1 << 13) + 0b111 + 1));

        let worst_four = hand("KS QH JD TC");
        assert!(rank_badugi(&worst_four).beats(rank_badugi(&three)));

        let one = hand("9S 8S 7S 6S");
        let (rank, cards, unused) = Low::Badugi.best(&one).unwrap();
        assert_eq!(rank, rank_badugi(&one));
        assert_eq!(cards, hand("6S"));
        assert_eq!(unused.len(), 3);

        assert_eq!(rank_badugi(&[]), EvalRank::INVALID);
    }

    #[test]
    fn deuce_seven() {
        let seven_five = hand("7H 5C 4C 3C 2C");
        let eight_six = hand("8H 6C 4C 3C 2C");
        let suited = hand("7C 5C 4C 3C 2C");

        assert_eq!(rank_lowball(&seven_five), EvalRank::BEST);
        assert!(rank_lowball(&seven_five).beats(rank_lowball(&eight_six)));
        assert!(rank_lowball(&eight_six).beats(rank_lowball(&suited)));

        let mut cards = seven_five.clone();
        cards.extend(hand("2H KS"));
        assert_eq!(rank_lowball(&cards), EvalRank::BEST);
        let (rank, best, unused) = Low::DeuceSeven.best(&cards).unwrap();
        assert_eq!(rank, EvalRank::BEST);
        assert_eq!(best, seven_five);
        assert_eq!(unused, hand("KS 2H"));
    }

    #[test]
    fn deuce_seven_wheel() {
        let wheel = rank_lowball(&hand("5H 4C 3C 2C AC"));
        let king_high = rank_lowball(&hand("KH 8C 6C 4D 3C"));
        let ace_six = rank_lowball(&hand("AH 6C 4C 3D 2C"));
        let deuces = rank_lowball(&hand("2H 2C 6C 4D 3C"));
        let six_high = rank_lowball(&hand("6H 5C 4C 3D 2C"));

        // A-5-4-3-2 is the best ace high hand, after all the king high hands.
        assert_eq!(wheel, EvalRank::new(785));
        assert_eq!(ace_six, EvalRank::new(786));
        assert!(king_high.beats(wheel));
        assert!(wheel.beats(ace_six));
        assert!(wheel.beats(deuces));
        assert!(deuces.beats(six_high));

        // Suited it is the best ace high flush.
        let wheel_flush = rank_lowball(&hand("5C 4C 3C 2C AC"));
        let ace_six_flush = rank_lowball(&hand("AC 6C 4C 3C 2C"));
        let king_flush = rank_lowball(&hand("KC 8C 6C 4C 3C"));
        let full_house = rank_lowball(&hand("2H 2C 2D 3C 3H"));
        assert!(six_high.beats(wheel_flush));
        assert!(king_flush.beats(wheel_flush));
        assert!(wheel_flush.beats(ace_six_flush));
        assert!(wheel_flush.beats(full_house));
    }

    #[test]
    fn deuce_seven_table() {
        let table = &*DEUCE_SEVEN;
        let mut ranks = table[1..].to_vec();
        ranks.sort_unstable();
        assert!(ranks.iter().copied().eq(1..=EvalRank::NOTHING.value()));

        // Other than the A-5-4-3-2 hands the order is the high order reversed.
        let wheels = [EvalRank::STRAIGHT_FLUSH, EvalRank::STRAIGHT];
        let others = (1..=EvalRank::NOTHING.value())
            .map(EvalRank::new)
            .filter(|r| !wheels.contains(r))
            .collect::<Vec<_>>();
        let lowball = |r: EvalRank| table[r.value() as usize];
        assert!(others.windows(2).all(|w| lowball(w[0]) > lowball(w[1])));
    }

    #[test]
    fn low_is_min_over_subsets() {
        let mut rng = SmallRng::seed_from_u64(13);
        Deck::default().sample(&mut rng, 5_000, 7, |cards| {
            let mut expected = EvalRank::INVALID;
            subsets::for_each_split(cards, 5, |five, _| {
                expected = expected.min(rank_ace_five(five));
            });

            assert_eq!(rank_ace_five(cards), expected);
            let (rank, best, unused) = Low::AceFive.best(cards).unwrap();
            assert_eq!(rank, expected);
            assert_eq!(rank_ace_five(&best), expected);
            assert_eq!(best.len() + unused.len(), 7);

            let mut expected = EvalRank::INVALID;
            subsets::for_each_split(cards, 5, |five, _| {
                expected = expected.min(rank_lowball(five));
            });
            assert_eq!(rank_lowball(cards), expected);
        });
    }

    #[test]
    fn split_eval_hi_lo() {
        let pocket = hand("AH 2H");
        let board = hand("3H 4H 5H KC KS");

        let (hi, lo) = split_eval(&Cactus, Some(Low::EightOrBetter), &pocket, &board);
        assert_eq!(hi, EvalRank::STRAIGHT_FLUSH);
        assert_eq!(lo, EvalRank::new(1));

        let (_, lo) = split_eval(&Cactus, None, &pocket, &board);
        assert_eq!(lo, EvalRank::INVALID);
    }
}
