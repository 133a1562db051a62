//! Payout ranks of the Loto.
//!
//! | Rank | Main numbers | Lucky number |
//! |------|--------------|--------------|
//! | 1 | 5 | yes |
//! | 2 | 5 | no |
//! | 3 | 4 | yes |
//! | 4 | 4 | no |
//! | 5 | 3 | yes |
//! | 6 | 3 | no |
//! | 7 | 2 | yes |
//! | 8 | 2 | no |
//! | 9 | 1 | yes |
//!
//! A single main number only pays together with the lucky number; nothing
//! else pays.

use crate::types::PayoutTable;

/// Rank (1..=9) won by `match_count` main numbers, or `None`.
#[inline(always)]
pub fn rank_for(match_count: u32, lucky_match: bool) -> Option<usize> {
    match (match_count, lucky_match) {
        (5, true) => Some(1),
        (5, false) => Some(2),
        (4, true) => Some(3),
        (4, false) => Some(4),
        (3, true) => Some(5),
        (3, false) => Some(6),
        (2, true) => Some(7),
        (2, false) => Some(8),
        (1, true) => Some(9),
        _ => None,
    }
}

/// Amount paid by `table` for this match.
#[inline(always)]
pub fn resolve(match_count: u32, lucky_match: bool, table: &PayoutTable) -> f64 {
    rank_for(match_count, lucky_match).map_or(0.0, |rank| table.rank(rank))
}
