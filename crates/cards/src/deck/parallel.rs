// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use rand::prelude::*;
use std::thread;

use super::Deck;
use crate::{
    card::{Card, Rank, Suit},
    subsets,
};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The closure takes an usize that is the task identifier (0..num_task)
    /// and a slice of cards of length k, each task visits a contiguous range
    /// of the k-subsets.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!((2..=subsets::MAX_K).contains(&k), "2 <= k <= 7");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        if k > n {
            return;
        }

        let num_hands = subsets::nck(n, k);
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id * hands_per_task;
                if start >= num_hands {
                    break;
                }

                let count = hands_per_task.min(num_hands - start);
                let f = &f;
                s.spawn(move || {
                    let mut h = [Card::new(Rank::Ace, Suit::Diamonds); subsets::MAX_K];
                    subsets::for_each_ksubset(n, k, start, count, |p| {
                        for (idx, &pos) in p.iter().enumerate() {
                            h[idx] = self.cards[pos];
                        }

                        f(task_id, &h[..k]);
                    });
                });
            }
        });
    }

    /// Calls the given closure from `num_tasks` parallel tasks generating
    /// `samples_per_task` samples of size k.
    pub fn par_sample<F>(&self, num_tasks: usize, samples_per_task: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!(num_tasks > 0);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let f = &f;
                s.spawn(move || {
                    let mut rng = SmallRng::from_os_rng();
                    self.sample(&mut rng, samples_per_task, k, |hand| f(task_id, hand));
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn par_for_each_visits_all() {
        let deck = Deck::default();
        let counter = AtomicUsize::new(0);

        deck.par_for_each(3, 4, |task_id, hand| {
            assert!(task_id < 3);
            assert_eq!(hand.len(), 4);
            counter.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(counter.load(Ordering::Relaxed), 270_725);
    }

    #[test]
    fn par_for_each_more_tasks_than_hands() {
        let deck = Deck::default().into_iter().take(5).collect::<Deck>();
        let counter = AtomicUsize::new(0);

        deck.par_for_each(8, 5, |_, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn par_sample_counts() {
        let counter = AtomicUsize::new(0);
        Deck::default().par_sample(4, 10, 7, |_, hand| {
            assert_eq!(hand.len(), 7);
            counter.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(counter.load(Ordering::Relaxed), 40);
    }
}
