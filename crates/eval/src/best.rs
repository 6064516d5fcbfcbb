// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best five cards selection.
use crate::{Card, HandRank, Rank, Suit, cactus};

/// Returns the five cards that make a hand with the given category and the
/// cards that are not used.
///
/// Both the best and unused cards are ordered from the highest card to the
/// lowest, cards with the same rank are ordered by suit. Straights are ordered
/// from the highest card with the ace last for a five high straight, sets are
/// ordered by group size so that, for example, a full house is ordered as
/// `KC KH KS 4C 4D`.
///
/// Panics if there are less than 5 or more than 7 cards or if the cards don't
/// make a hand with the given category.
pub fn best_five(cards: &[Card], hand_rank: HandRank) -> (Vec<Card>, Vec<Card>) {
    assert!(
        (5..=7).contains(&cards.len()),
        "Cannot select best cards from {} cards",
        cards.len()
    );

    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));

    let ordered = match hand_rank {
        HandRank::StraightFlush => {
            let suit = majority_suit(&sorted);
            let (suited, others) = sorted
                .iter()
                .copied()
                .partition::<Vec<_>, _>(|c| c.suit() == suit);
            straight(&suited).map(|mut ordered| {
                ordered.extend(others);
                ordered
            })
        }
        HandRank::Straight => straight(&sorted),
        HandRank::Flush => {
            let suit = majority_suit(&sorted);
            let (mut suited, others) = sorted
                .iter()
                .copied()
                .partition::<Vec<_>, _>(|c| c.suit() == suit);
            suited.extend(others);
            Some(suited)
        }
        HandRank::FourOfAKind => Some(groups_first(&sorted, 1)),
        HandRank::FullHouse => Some(groups_first(&sorted, 2)),
        HandRank::ThreeOfAKind => Some(groups_first(&sorted, 1)),
        HandRank::TwoPair => Some(groups_first(&sorted, 2)),
        HandRank::OnePair => Some(groups_first(&sorted, 1)),
        HandRank::HighCard => Some(sorted),
    };

    let Some(mut best) = ordered else {
        panic!("No {hand_rank} in {cards:?}");
    };

    let mut unused = best.split_off(5);
    unused.sort_by(|a, b| b.cmp(a));

    let found = cactus::rank_cards(&best).hand_rank();
    assert_eq!(found, hand_rank, "Expected {hand_rank} in {cards:?}");

    (best, unused)
}

/// The suit with most cards.
fn majority_suit(cards: &[Card]) -> Suit {
    let mut counts = [0usize; Suit::COUNT];
    for c in cards {
        counts[c.suit().index()] += 1;
    }

    Suit::suits()
        .max_by_key(|s| counts[s.index()])
        .unwrap_or(Suit::Spades)
}

/// Finds the highest straight, returns the straight cards followed by the
/// other cards or none if there is no straight.
///
/// The cards must be sorted in descending order.
fn straight(sorted: &[Card]) -> Option<Vec<Card>> {
    let mask = sorted.iter().fold(0u16, |m, c| m | c.rank_mask());

    let high = (Rank::Six as usize..=Rank::Ace as usize)
        .rev()
        .find(|&high| (mask >> (high - 4)) & 0x1F == 0x1F);

    let ranks = match high {
        Some(high) => (0..5).map(|i| Rank::from_index(high - i)).collect::<Vec<_>>(),
        None if mask & 0x100F == 0x100F => {
            vec![Rank::Five, Rank::Four, Rank::Trey, Rank::Deuce, Rank::Ace]
        }
        None => return None,
    };

    let mut ordered = Vec::with_capacity(sorted.len());
    let mut rest = sorted.to_vec();
    for rank in ranks {
        let pos = rest.iter().position(|c| c.rank() == rank)?;
        ordered.push(rest.remove(pos));
    }

    ordered.extend(rest);
    Some(ordered)
}

/// Moves the cards of the first `num_groups` rank groups in front, groups are
/// ordered by size and then by rank.
///
/// The cards must be sorted in descending order.
fn groups_first(sorted: &[Card], num_groups: usize) -> Vec<Card> {
    let mut counts = [0usize; Rank::COUNT];
    for c in sorted {
        counts[c.rank() as usize] += 1;
    }

    let mut groups = Rank::ranks()
        .filter(|r| counts[*r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| b.cmp(a));

    let leading = &groups[..num_groups.min(groups.len())];
    let mut ordered = Vec::with_capacity(sorted.len());
    for (_, rank) in leading {
        ordered.extend(sorted.iter().filter(|c| c.rank() == *rank));
    }

    ordered.extend(
        sorted
            .iter()
            .filter(|c| leading.iter().all(|(_, r)| c.rank() != *r)),
    );

    ordered
}
