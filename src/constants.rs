//! Game constants for the French Loto (post-2017 rules).
//!
//! - 5 main numbers drawn from 1..=[`MAX_NUMBER`]
//! - 1 lucky number ("numéro Chance") drawn from 1..=[`MAX_LUCKY_NUMBER`]
//! - 9 payout ranks, see [`crate::payout`]

use chrono::NaiveDate;

/// Price of one ticket for one draw.
pub const TICKET_PRICE: f64 = 2.2;

/// Highest main number.
pub const MAX_NUMBER: u8 = 49;

/// Highest lucky number.
pub const MAX_LUCKY_NUMBER: u8 = 10;

/// Main numbers on a ticket and in a draw.
pub const SELECTION_COUNT: usize = 5;

/// Number of payout ranks (rang1..rang9).
pub const RANK_COUNT: usize = 9;

/// Bits covered by the low word of a [`crate::bitmask::Bitmask`].
pub const LOW_WORD_BITS: u8 = 32;

/// Attempt cap for the profitability search.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20_000;

/// Attempts between two cooperative yields of the search.
pub const DEFAULT_BATCH_SIZE: u32 = 200;

/// Largest attempt cap accepted from an HTTP client.
pub const MAX_SEARCH_ATTEMPTS: u32 = 1_000_000;

/// Largest batch accepted from an HTTP client or the environment. Bounds the
/// time the search holds a worker between two yields.
pub const MAX_BATCH_SIZE: u32 = 10_000;

/// Default location of the draw history feed, relative to the base path.
pub const DATA_FILE_PATH: &str = "data/loto_combined.csv";

/// Rules change date: draws before this are never evaluated.
pub const MIN_DRAW_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 3, 6) {
    Some(d) => d,
    None => panic!("invalid rules change date"),
};

/// Whether `n` is a valid main number.
#[inline(always)]
pub fn is_valid_number(n: u8) -> bool {
    (1..=MAX_NUMBER).contains(&n)
}

/// Whether `n` is a valid lucky number.
#[inline(always)]
pub fn is_valid_lucky_number(n: u8) -> bool {
    (1..=MAX_LUCKY_NUMBER).contains(&n)
}
