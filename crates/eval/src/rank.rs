// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand ranks and categories.
//!
//! A hand rank is a number where lower values are stronger hands, the best hand
//! (a royal flush) has rank 1 and the worst 5 cards hand (7-5-4-3-2 offsuit) has
//! rank [EvalRank::NOTHING]. Each [HandRank] category owns a contiguous range of
//! ranks so that the category of a rank is given by the range it falls in:
//!
//! ```text
//!   Straight Flush       1 -   10
//!   Four of a Kind      11 -  166
//!   Full House         167 -  322
//!   Flush              323 - 1599
//!   Straight          1600 - 1609
//!   Three of a Kind   1610 - 2467
//!   Two Pair          2468 - 3325
//!   One Pair          3326 - 6185
//!   High Card         6186 - 7462
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rank of a hand, lower values are stronger hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvalRank(u16);

impl EvalRank {
    /// The best hand rank, a royal flush.
    pub const BEST: EvalRank = EvalRank(1);
    /// The worst straight flush (five high).
    pub const STRAIGHT_FLUSH: EvalRank = EvalRank(10);
    /// The worst four of a kind.
    pub const FOUR_OF_A_KIND: EvalRank = EvalRank(166);
    /// The worst full house.
    pub const FULL_HOUSE: EvalRank = EvalRank(322);
    /// The worst flush.
    pub const FLUSH: EvalRank = EvalRank(1599);
    /// The worst straight.
    pub const STRAIGHT: EvalRank = EvalRank(1609);
    /// The worst three of a kind.
    pub const THREE_OF_A_KIND: EvalRank = EvalRank(2467);
    /// The worst two pair.
    pub const TWO_PAIR: EvalRank = EvalRank(3325);
    /// The worst pair.
    pub const PAIR: EvalRank = EvalRank(6185);
    /// The worst high card hand and the worst hand overall.
    pub const NOTHING: EvalRank = EvalRank(7462);
    /// No hand, used for example when a hand doesn't qualify for low.
    pub const INVALID: EvalRank = EvalRank(u16::MAX);

    /// Creates a rank from its numeric value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// The numeric value of this rank.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Checks if this is not the [EvalRank::INVALID] sentinel.
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID && self.0 != 0
    }

    /// Checks if this rank is in the high hands rank space (1..=7462).
    #[inline]
    pub fn is_high(self) -> bool {
        (Self::BEST..=Self::NOTHING).contains(&self)
    }

    /// Checks if this rank is a stronger hand than the other rank.
    #[inline]
    pub fn beats(self, other: EvalRank) -> bool {
        self < other
    }

    /// Returns the category of this high hand rank.
    ///
    /// Panics if this is not a high hand rank.
    pub fn hand_rank(self) -> HandRank {
        HandRank::from_rank(self)
    }

    /// Converts a high rank to a lowball rank.
    ///
    /// The lowball rank space mirrors the high rank space so that the worst high
    /// hand becomes the best lowball hand. A-5-4-3-2 keeps its straight rank,
    /// [crate::low::rank_lowball] ranks it as an ace high hand for deuce to
    /// seven. [EvalRank::INVALID] maps to itself.
    ///
    /// Panics if the rank is neither a high rank or the invalid rank.
    pub fn to_lowball(self) -> EvalRank {
        self.mirror()
    }

    /// Converts a lowball rank back to a high rank.
    pub fn from_lowball(self) -> EvalRank {
        self.mirror()
    }

    fn mirror(self) -> EvalRank {
        if self == Self::INVALID {
            return self;
        }

        assert!(self.is_high(), "Invalid rank {}", self.0);
        EvalRank(Self::NOTHING.0 + 1 - self.0)
    }

    /// Converts a high rank to a rank where a flush beats a full house.
    ///
    /// Used by short deck games, flush ranks move before the full house ranks
    /// and all the other ranks stay the same. [EvalRank::INVALID] maps to itself.
    ///
    /// Panics if the rank is neither a high rank or the invalid rank.
    pub fn to_flush_over(self) -> EvalRank {
        const FULL_HOUSES: u16 = EvalRank::FULL_HOUSE.0 - EvalRank::FOUR_OF_A_KIND.0;
        const FLUSHES: u16 = EvalRank::FLUSH.0 - EvalRank::FULL_HOUSE.0;

        if self == Self::INVALID {
            return self;
        }

        assert!(self.is_high(), "Invalid rank {}", self.0);
        match self {
            r if r <= Self::FOUR_OF_A_KIND => r,
            r if r <= Self::FULL_HOUSE => EvalRank(r.0 + FLUSHES),
            r if r <= Self::FLUSH => EvalRank(r.0 - FULL_HOUSES),
            r => r,
        }
    }

    /// Converts a flush over full house rank back to a high rank.
    pub fn from_flush_over(self) -> EvalRank {
        const FULL_HOUSES: u16 = EvalRank::FULL_HOUSE.0 - EvalRank::FOUR_OF_A_KIND.0;
        const FLUSHES: u16 = EvalRank::FLUSH.0 - EvalRank::FULL_HOUSE.0;

        if self == Self::INVALID {
            return self;
        }

        assert!(self.is_high(), "Invalid rank {}", self.0);
        match self {
            r if r <= Self::FOUR_OF_A_KIND => r,
            r if r.0 <= Self::FOUR_OF_A_KIND.0 + FLUSHES => EvalRank(r.0 + FULL_HOUSES),
            r if r <= Self::FLUSH => EvalRank(r.0 - FLUSHES),
            r => r,
        }
    }
}

impl fmt::Display for EvalRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "Invalid")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    /// The number of categories.
    pub const COUNT: usize = 9;

    /// All categories from the weakest to the strongest.
    pub const ALL: [HandRank; HandRank::COUNT] = [
        HandRank::HighCard,
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
    ];

    /// Returns the category for a high hand rank.
    ///
    /// Panics if the rank is not a high hand rank.
    pub fn from_rank(rank: EvalRank) -> HandRank {
        match rank {
            r if r < EvalRank::BEST => panic!("Invalid rank {r}"),
            r if r <= EvalRank::STRAIGHT_FLUSH => HandRank::StraightFlush,
            r if r <= EvalRank::FOUR_OF_A_KIND => HandRank::FourOfAKind,
            r if r <= EvalRank::FULL_HOUSE => HandRank::FullHouse,
            r if r <= EvalRank::FLUSH => HandRank::Flush,
            r if r <= EvalRank::STRAIGHT => HandRank::Straight,
            r if r <= EvalRank::THREE_OF_A_KIND => HandRank::ThreeOfAKind,
            r if r <= EvalRank::TWO_PAIR => HandRank::TwoPair,
            r if r <= EvalRank::PAIR => HandRank::OnePair,
            r if r <= EvalRank::NOTHING => HandRank::HighCard,
            r => panic!("Invalid rank {r}"),
        }
    }

    /// The strongest rank in this category.
    pub fn first_rank(self) -> EvalRank {
        match self {
            HandRank::StraightFlush => EvalRank::BEST,
            r => EvalRank(HandRank::ALL[r as usize + 1].last_rank().0 + 1),
        }
    }

    /// The weakest rank in this category.
    pub fn last_rank(self) -> EvalRank {
        match self {
            HandRank::HighCard => EvalRank::NOTHING,
            HandRank::OnePair => EvalRank::PAIR,
            HandRank::TwoPair => EvalRank::TWO_PAIR,
            HandRank::ThreeOfAKind => EvalRank::THREE_OF_A_KIND,
            HandRank::Straight => EvalRank::STRAIGHT,
            HandRank::Flush => EvalRank::FLUSH,
            HandRank::FullHouse => EvalRank::FULL_HOUSE,
            HandRank::FourOfAKind => EvalRank::FOUR_OF_A_KIND,
            HandRank::StraightFlush => EvalRank::STRAIGHT_FLUSH,
        }
    }

    /// The number of distinct ranks in this category.
    pub fn num_ranks(self) -> usize {
        (self.last_rank().0 - self.first_rank().0 + 1) as usize
    }

    /// The category name.
    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
