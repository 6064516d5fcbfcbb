// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table generation.
//!
//! A state id packs up to 7 cards in a u64, one card per byte with the rank in
//! the high nibble (1..=13) and the suit in the low nibble (1..=4), sorted in
//! descending order so that the id doesn't depend on the order the cards have
//! been added. Once there are not enough cards left to make a flush with a
//! suit, the suit nibble of its cards is set to zero, this merges the states
//! that can only differ by suit and keeps the table small.
use std::thread;

use super::{NUM_STATES, ROW_LEN, TABLE_LEN, encode};
use crate::{Card, EvalRank, Rank, Suit, cactus};

/// Builds the lookup table.
pub(super) fn table() -> Vec<u32> {
    let ids = state_ids();
    assert_eq!(ids.len(), NUM_STATES, "Wrong number of states");

    let mut table = vec![0u32; TABLE_LEN];

    let num_tasks = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let rows_per_task = ids.len().div_ceil(num_tasks);

    // Row 0 is not used, the row for state i starts at (i + 1) * 53.
    thread::scope(|s| {
        for (task_id, rows) in table[ROW_LEN..]
            .chunks_mut(ROW_LEN * rows_per_task)
            .enumerate()
        {
            let ids = &ids;
            s.spawn(move || {
                for (pos, row) in rows.chunks_mut(ROW_LEN).enumerate() {
                    fill_row(ids, task_id * rows_per_task + pos, row);
                }
            });
        }
    });

    table
}

/// Collects the ids of all hands with up to 6 cards, sorted.
fn state_ids() -> Vec<u64> {
    let mut ids = vec![0u64];
    let mut level = vec![0u64];

    for _ in 0..6 {
        let mut next = level
            .iter()
            .flat_map(|&id| (1..=Card::COUNT).filter_map(move |slot| add_card(id, slot).1))
            .collect::<Vec<_>>();

        next.sort_unstable();
        next.dedup();

        // Hands with more cards have a non zero higher byte so each level sorts
        // after the previous one.
        ids.extend_from_slice(&next);
        level = next;
    }

    ids
}

fn fill_row(ids: &[u64], state: usize, row: &mut [u32]) {
    let id = ids[state];
    let num_cards = card_count(id);

    for slot in 1..=Card::COUNT {
        let (_, next) = add_card(id, slot);
        row[slot] = if num_cards < 6 {
            match next {
                Some(next) => match ids.binary_search(&next) {
                    Ok(pos) => (ROW_LEN * (pos + 1)) as u32,
                    Err(_) => panic!("Missing state 0x{next:014x}"),
                },
                None => ROW_LEN as u32,
            }
        } else {
            next.map_or(0, |next| encode(eval_id(next)))
        };
    }

    if num_cards == 5 || num_cards == 6 {
        row[0] = encode(eval_id(id));
    }
}

fn card_count(id: u64) -> usize {
    8 - (id.leading_zeros() as usize / 8)
}

/// Encodes the card for a 1-based slot.
fn card_byte(slot: usize) -> u8 {
    let s = slot - 1;
    ((((s >> 2) + 1) << 4) | ((s & 3) + 1)) as u8
}

/// Adds the card with the given slot to a state, returns the number of cards
/// and the new state id, the id is none if the card is a duplicate or the hand
/// has more than four cards of a rank.
fn add_card(id: u64, slot: usize) -> (usize, Option<u64>) {
    let mut cards = [0u8; 8];
    for (i, card) in cards[1..7].iter_mut().enumerate() {
        *card = (id >> (8 * i)) as u8;
    }

    cards[0] = card_byte(slot);

    let mut suits = [0u8; 5];
    let mut ranks = [0u8; 14];
    let mut num_cards = 0;
    let mut duplicate = false;

    while cards[num_cards] != 0 {
        let card = cards[num_cards];
        suits[(card & 0xF) as usize] += 1;
        ranks[(card >> 4) as usize] += 1;
        duplicate |= num_cards > 0 && card == cards[0];
        num_cards += 1;
    }

    if duplicate || (num_cards > 4 && ranks.iter().any(|&c| c > 4)) {
        return (num_cards, None);
    }

    // Suits that cannot make a flush any more.
    let needed = num_cards.saturating_sub(2);
    if needed > 1 {
        for card in &mut cards[..num_cards] {
            if suits[(*card & 0xF) as usize] < needed as u8 {
                *card &= 0xF0;
            }
        }
    }

    cards.sort_unstable_by(|a, b| b.cmp(a));

    let id = cards[..7]
        .iter()
        .enumerate()
        .fold(0u64, |id, (i, &card)| id | ((card as u64) << (8 * i)));

    (num_cards, Some(id))
}

/// Evaluates a state with 5, 6, or 7 cards.
///
/// Cards without a suit get one of the suits that is not used for a flush,
/// cycling through them so that they cannot make a flush or a duplicate.
fn eval_id(id: u64) -> EvalRank {
    let bytes = (0..7)
        .map(|i| (id >> (8 * i)) as u8)
        .take_while(|&b| b != 0)
        .collect::<Vec<_>>();

    let flush_suit = bytes.iter().rev().map(|b| b & 0xF).find(|&s| s != 0);

    let mut last = 0;
    let mut next_suit = || loop {
        last = last % 4 + 1;
        if Some(last) != flush_suit {
            break last;
        }
    };

    let cards = bytes
        .iter()
        .map(|&b| {
            let suit = match b & 0xF {
                0 => next_suit(),
                s => s,
            };

            let rank = Rank::from_index((b >> 4) as usize - 1);
            Card::new(rank, Suit::from_index(suit as usize - 1))
        })
        .collect::<Vec<_>>();

    cactus::rank_cards(&cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::hand;

    fn add_cards(cards: &[Card]) -> Option<u64> {
        cards
            .iter()
            .try_fold(0u64, |id, card| add_card(id, card.slot()).1)
    }

    #[test]
    fn card_bytes() {
        assert_eq!(card_byte(1), 0x11);
        assert_eq!(card_byte(2), 0x12);
        assert_eq!(card_byte(Card::new(Rank::Ace, Suit::Clubs).slot()), 0xD4);
        assert_eq!(card_byte(Card::new(Rank::Ten, Suit::Diamonds).slot()), 0x93);
    }

    #[test]
    fn state_count() {
        let ids = state_ids();
        assert_eq!(ids.len(), NUM_STATES);
        assert_eq!(ids[0], 0);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let mut counts = [0usize; 7];
        for &id in &ids {
            counts[card_count(id)] += 1;
        }

        assert_eq!(counts, [1, 52, 1326, 22_100, 84_448, 152_607, 352_443]);
    }

    #[test]
    fn add_card_order() {
        let mut cards = hand("2S 3H KH AH");
        let id = add_cards(&cards);
        cards.reverse();
        assert_eq!(add_cards(&cards), id);

        // Hearts are kept as they can still make a flush.
        assert_eq!(id, Some(0x10_22_C2_D2));
    }

    #[test]
    fn add_card_drops_suits() {
        // No suit can make a flush with four suits in four cards.
        let cards = hand("2S 3H 4D 5C");
        assert_eq!(add_cards(&cards), Some(0x10_20_30_40));

        // A card with the same rank and a dropped suit is not a duplicate.
        let five = Card::new(Rank::Five, Suit::Hearts);
        let (count, id) = add_card(0x10_20_30_40, five.slot());
        assert_eq!(count, 5);
        assert!(id.is_some());
    }

    #[test]
    fn add_card_invalid() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        let (count, id) = add_card(card_byte(card.slot()) as u64, card.slot());
        assert_eq!(count, 2);
        assert_eq!(id, None);
    }

    #[test]
    fn eval_states() {
        let hands = [
            hand("AS KS QS JS TS"),
            hand("AS KC QS JS TS"),
            hand("AS AC AH 2S 2H 2C"),
            hand("9H 8C 7H 6D 5H 2H KH"),
            hand("9H 8C 7H 6D 5H 2S KH"),
        ];

        for hand in hands {
            let id = add_cards(&hand).unwrap();
            assert_eq!(card_count(id), hand.len());
            assert_eq!(eval_id(id), cactus::rank_cards(&hand), "{hand:?}");
        }
    }
}
