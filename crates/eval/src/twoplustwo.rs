// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Incremental lookup table evaluator.
//!
//! The table is a state machine with one 53 entries row for each distinct
//! partial hand of up to 6 cards. Evaluating a hand walks the table one card at
//! a time starting from the root row:
//!
//! ```text
//!   index = 53
//!   for card in cards:
//!       index = table[index + card.slot()]
//!   if cards.len() < 7:
//!       index = table[index]
//! ```
//!
//! and the final value is a packed rank with the category in the high bits and
//! the strength within the category in the low 12 bits.
//!
//! The table has more than 32M entries, it can be generated on startup (it takes
//! a few seconds on a multi core machine) or loaded from a file saved with
//! [TwoPlusTwo::save], see [TableConfig].
use log::{error, info};
use parking_lot::{Mutex, const_mutex};
use std::{
    env::{self, VarError},
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::Instant,
};
use xxhash_rust::xxh3::Xxh3;

use crate::{Card, EvalRank, Evaluator, HandRank, Rank, Suit, TableError, cactus};

mod generate;

/// The number of partial hand states.
pub const NUM_STATES: usize = 612_977;

/// The number of entries in a table row, one for each card slot plus the
/// rank entry.
pub const ROW_LEN: usize = 53;

/// The number of table entries.
pub const TABLE_LEN: usize = NUM_STATES * ROW_LEN + ROW_LEN;

/// Environment variable with the path of a table file.
pub const TABLE_PATH_VAR: &str = "HANDRANK_TABLE";

/// Environment variable with the expected xxh3 checksum of the table in hex.
pub const TABLE_CHECKSUM_VAR: &str = "HANDRANK_TABLE_XXH3";

/// Entries written per I/O and checksum chunk.
const CHUNK_LEN: usize = 64 * 1024;

static TABLE: OnceLock<TwoPlusTwo> = OnceLock::new();
static INIT: Mutex<()> = const_mutex(());

/// Configures where the table comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Load the table from this file, generate it if none.
    pub path: Option<PathBuf>,
    /// The expected xxh3 checksum of the table.
    pub checksum: Option<u64>,
}

impl TableConfig {
    /// Creates a configuration from the `HANDRANK_TABLE` and `HANDRANK_TABLE_XXH3`
    /// environment variables.
    pub fn from_env() -> Result<Self, TableError> {
        let path = env::var_os(TABLE_PATH_VAR).map(PathBuf::from);
        let checksum = checksum_var(env::var(TABLE_CHECKSUM_VAR))?;
        Ok(Self { path, checksum })
    }
}

/// Parses the checksum variable, a missing variable disables the check.
fn checksum_var(var: Result<String, VarError>) -> Result<Option<u64>, TableError> {
    match var {
        Ok(hex) => parse_checksum(&hex).map(Some),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(value)) => Err(TableError::Config(format!(
            "{TABLE_CHECKSUM_VAR}={}",
            value.to_string_lossy()
        ))),
    }
}

fn parse_checksum(hex: &str) -> Result<u64, TableError> {
    let digits = hex.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|_| TableError::Config(format!("{TABLE_CHECKSUM_VAR}={hex}")))
}

/// Initializes the process wide table with the given configuration.
///
/// If the table has already been initialized the configuration is ignored and
/// the existing table is returned.
pub fn init(config: &TableConfig) -> Result<&'static TwoPlusTwo, TableError> {
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }

    // Only one thread builds the table.
    let _guard = INIT.lock();
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }

    let table = TwoPlusTwo::with_config(config)?;
    Ok(TABLE.get_or_init(|| table))
}

/// The incremental lookup table evaluator.
pub struct TwoPlusTwo {
    table: Vec<u32>,
}

impl TwoPlusTwo {
    /// Generates the table.
    pub fn generate() -> Self {
        let now = Instant::now();
        let table = generate::table();
        info!(
            "Generated {} entries table in {:.3}s",
            table.len(),
            now.elapsed().as_secs_f64()
        );

        Self { table }
    }

    /// Creates the table from the configuration.
    pub fn with_config(config: &TableConfig) -> Result<Self, TableError> {
        let table = match &config.path {
            Some(path) => Self::load(path)?,
            None => Self::generate(),
        };

        if let Some(expected) = config.checksum {
            let found = table.checksum();
            if found != expected {
                error!("Table checksum 0x{found:016x} expected 0x{expected:016x}");
                return Err(TableError::Checksum { found, expected });
            }

            info!("Table checksum 0x{found:016x}");
        }

        Ok(table)
    }

    /// The process wide table.
    ///
    /// On first use the table is initialized from the configuration in the
    /// environment, see [TableConfig::from_env].
    ///
    /// Panics if the table cannot be initialized.
    pub fn global() -> &'static TwoPlusTwo {
        if let Some(table) = TABLE.get() {
            return table;
        }

        match TableConfig::from_env().and_then(|config| init(&config)) {
            Ok(table) => table,
            Err(e) => {
                error!("Hand ranks table initialization failed: {e}");
                panic!("Cannot initialize hand ranks table: {e}");
            }
        }
    }

    /// Creates the table from little endian 32 bits entries.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        let expected = TABLE_LEN * 4;
        if bytes.len() != expected {
            return Err(TableError::Size {
                found: bytes.len(),
                expected,
            });
        }

        let table = bytes
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        let table = Self { table };
        table.verify()?;
        Ok(table)
    }

    /// Loads the table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let now = Instant::now();

        let res = fs::read(path)
            .map_err(TableError::from)
            .and_then(|bytes| Self::from_bytes(&bytes));
        match &res {
            Ok(_) => info!(
                "Loaded table {} in {:.3}s",
                path.display(),
                now.elapsed().as_secs_f64()
            ),
            Err(e) => error!("Cannot load table {}: {e}", path.display()),
        }

        res
    }

    /// Saves the table to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(fs::File::create(path)?);

        let mut buf = Vec::with_capacity(CHUNK_LEN * 4);
        for chunk in self.table.chunks(CHUNK_LEN) {
            buf.clear();
            buf.extend(chunk.iter().flat_map(|v| v.to_le_bytes()));
            writer.write_all(&buf)?;
        }

        writer.flush()?;
        info!("Saved table {}", path.display());
        Ok(())
    }

    /// The xxh3 checksum of the table little endian bytes.
    pub fn checksum(&self) -> u64 {
        let mut hasher = Xxh3::new();
        let mut buf = Vec::with_capacity(CHUNK_LEN * 4);
        for chunk in self.table.chunks(CHUNK_LEN) {
            buf.clear();
            buf.extend(chunk.iter().flat_map(|v| v.to_le_bytes()));
            hasher.update(&buf);
        }

        hasher.digest()
    }

    /// Checks the table ranks some known hands like the five cards evaluator.
    pub fn verify(&self) -> Result<(), TableError> {
        for hand in known_hands() {
            let expected = cactus::rank_cards(&hand);
            let found = self.try_rank(&hand).unwrap_or(EvalRank::INVALID);
            if found != expected {
                let hand = hand.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                return Err(TableError::Content {
                    hand: hand.join(" "),
                    found,
                    expected,
                });
            }
        }

        Ok(())
    }

    /// Ranks a hand of 5, 6, or 7 cards.
    ///
    /// Panics if the hand doesn't have 5, 6, or 7 cards.
    #[inline]
    pub fn rank_cards(&self, cards: &[Card]) -> EvalRank {
        assert!(
            (5..=7).contains(&cards.len()),
            "Cannot rank {} cards",
            cards.len()
        );

        let mut index = ROW_LEN;
        for card in cards {
            index = self.table[index + card.slot()] as usize;
        }

        if cards.len() < 7 {
            index = self.table[index] as usize;
        }

        decode(index as u32)
    }

    /// Same as [TwoPlusTwo::rank_cards] with bounds checks for unverified tables.
    fn try_rank(&self, cards: &[Card]) -> Option<EvalRank> {
        let mut index = ROW_LEN;
        for card in cards {
            index = *self.table.get(index + card.slot())? as usize;
        }

        if cards.len() < 7 {
            index = *self.table.get(index)? as usize;
        }

        try_decode(index as u32)
    }
}

impl Evaluator for TwoPlusTwo {
    #[inline]
    fn rank(&self, cards: &[Card]) -> EvalRank {
        self.rank_cards(cards)
    }
}

impl std::fmt::Debug for TwoPlusTwo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwoPlusTwo")
            .field("entries", &self.table.len())
            .finish()
    }
}

/// Packs a rank into a table value, category code 1 is high card and 9 is
/// straight flush, strength 1 is the weakest hand in the category.
pub(crate) fn encode(rank: EvalRank) -> u32 {
    let hand_rank = rank.hand_rank();
    let strength = hand_rank.last_rank().value() - rank.value() + 1;
    ((hand_rank as u32 + 1) << 12) | strength as u32
}

/// Unpacks a table value.
///
/// Panics if the value doesn't have a valid category.
#[inline]
fn decode(value: u32) -> EvalRank {
    match try_decode(value) {
        Some(rank) => rank,
        None => panic!("Invalid table value 0x{value:x}"),
    }
}

#[inline]
fn try_decode(value: u32) -> Option<EvalRank> {
    let category = (value >> 12) as usize;
    let strength = (value & 0xFFF) as u16;

    let hand_rank = *HandRank::ALL.get(category.checked_sub(1)?)?;
    if strength == 0 || strength as usize > hand_rank.num_ranks() {
        return None;
    }

    Some(EvalRank::new(hand_rank.last_rank().value() - strength + 1))
}

/// Hands used to check a loaded table.
fn known_hands() -> Vec<Vec<Card>> {
    use Rank::*;
    use Suit::*;

    let hands: [&[(Rank, Suit)]; 7] = [
        // Royal flush.
        &[
            (Ace, Spades),
            (King, Spades),
            (Queen, Spades),
            (Jack, Spades),
            (Ten, Spades),
        ],
        // Wheel straight flush.
        &[
            (Five, Clubs),
            (Four, Clubs),
            (Trey, Clubs),
            (Deuce, Clubs),
            (Ace, Clubs),
        ],
        // Worst high card.
        &[
            (Seven, Hearts),
            (Five, Diamonds),
            (Four, Clubs),
            (Trey, Spades),
            (Deuce, Spades),
        ],
        // Full house in six cards.
        &[
            (Nine, Hearts),
            (Nine, Clubs),
            (Nine, Spades),
            (Four, Diamonds),
            (Four, Clubs),
            (Ace, Hearts),
        ],
        // Two pair in six cards.
        &[
            (King, Hearts),
            (King, Clubs),
            (Six, Spades),
            (Six, Diamonds),
            (Jack, Clubs),
            (Trey, Hearts),
        ],
        // Quads in seven cards.
        &[
            (Ace, Spades),
            (Ace, Clubs),
            (Ace, Diamonds),
            (Ace, Hearts),
            (King, Diamonds),
            (Deuce, Diamonds),
            (Trey, Clubs),
        ],
        // Flush in seven cards.
        &[
            (Nine, Hearts),
            (Eight, Clubs),
            (Seven, Hearts),
            (Six, Diamonds),
            (Five, Hearts),
            (Deuce, Hearts),
            (King, Hearts),
        ],
    ];

    hands
        .iter()
        .map(|h| h.iter().map(|&(r, s)| Card::new(r, s)).collect())
        .collect()
}
