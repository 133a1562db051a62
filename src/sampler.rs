//! Random ticket generation.
//!
//! Main numbers use rejection sampling: draw uniformly from 1..=49 and retry on
//! a repeat until 5 distinct values are collected. With 5 picks out of 49 the
//! expected number of retries is well under one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{MAX_LUCKY_NUMBER, MAX_NUMBER, SELECTION_COUNT};
use crate::types::Ticket;

/// A uniformly random valid ticket.
pub fn random_ticket<R: Rng + ?Sized>(rng: &mut R) -> Ticket {
    let mut numbers = [0u8; SELECTION_COUNT];
    let mut filled = 0;
    while filled < SELECTION_COUNT {
        let n = rng.random_range(1..=MAX_NUMBER);
        if !numbers[..filled].contains(&n) {
            numbers[filled] = n;
            filled += 1;
        }
    }
    let lucky_number = rng.random_range(1..=MAX_LUCKY_NUMBER);
    Ticket::from_parts(numbers, lucky_number)
}

/// Seeded generator when `seed` is given, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
