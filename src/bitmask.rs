//! Two-word bit packing of number sets and table-driven popcount.
//!
//! A set of main numbers (1..=49) is encoded as two `u32` words:
//! - `low`  bit `n-1`      for n in 1..=32
//! - `high` bit `n-1-32`   for n in 33..=49
//!
//! Intersecting a ticket with a draw is then two ANDs, and the number of
//! common numbers is `popcount32(low) + popcount32(high)`.

use serde::Serialize;

use crate::constants::{LOW_WORD_BITS, MAX_NUMBER};

/// Bit count for every byte value, built at compile time.
pub const POPCOUNT_TABLE: [u8; 256] = build_popcount_table();

const fn build_popcount_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut v = i;
        let mut count = 0u8;
        while v != 0 {
            count += (v & 1) as u8;
            v >>= 1;
        }
        table[i] = count;
        i += 1;
    }
    table
}

/// Number of set bits in `word`, as four byte lookups.
#[inline(always)]
pub fn popcount32(word: u32) -> u32 {
    POPCOUNT_TABLE[(word & 0xff) as usize] as u32
        + POPCOUNT_TABLE[((word >> 8) & 0xff) as usize] as u32
        + POPCOUNT_TABLE[((word >> 16) & 0xff) as usize] as u32
        + POPCOUNT_TABLE[((word >> 24) & 0xff) as usize] as u32
}

/// Bit-packed set of main numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Bitmask {
    #[serde(rename = "mask_low")]
    pub low: u32,
    #[serde(rename = "mask_high")]
    pub high: u32,
}

impl Bitmask {
    /// Common numbers of two sets.
    #[inline(always)]
    pub fn intersect(self, other: Bitmask) -> Bitmask {
        Bitmask {
            low: self.low & other.low,
            high: self.high & other.high,
        }
    }

    /// Number of numbers in the set.
    #[inline(always)]
    pub fn count(self) -> u32 {
        popcount32(self.low) + popcount32(self.high)
    }

    /// Whether `n` is in the set.
    pub fn contains(self, n: u8) -> bool {
        if !(1..=MAX_NUMBER).contains(&n) {
            return false;
        }
        let index = n - 1;
        if index < LOW_WORD_BITS {
            self.low & (1 << index) != 0
        } else {
            self.high & (1 << (index - LOW_WORD_BITS)) != 0
        }
    }

    /// Numbers in the set, ascending.
    pub fn numbers(self) -> Vec<u8> {
        (1..=MAX_NUMBER).filter(|&n| self.contains(n)).collect()
    }
}

/// Pack a list of numbers into a [`Bitmask`].
///
/// Duplicates collapse. Numbers outside 1..=49 have no bit position and are
/// skipped; range checks belong to the caller (see [`crate::types::Ticket::new`]).
pub fn pack(numbers: &[u8]) -> Bitmask {
    let mut mask = Bitmask::default();
    for &n in numbers {
        if !(1..=MAX_NUMBER).contains(&n) {
            continue;
        }
        let index = n - 1;
        if index < LOW_WORD_BITS {
            mask.low |= 1 << index;
        } else {
            mask.high |= 1 << (index - LOW_WORD_BITS);
        }
    }
    mask
}
