//! Property-based tests for packing, popcount, payouts and evaluation.

use chrono::NaiveDate;
use proptest::prelude::*;

use loto::bitmask::{pack, popcount32};
use loto::evaluator::{evaluate, total_payout};
use loto::payout::{rank_for, resolve};
use loto::types::{HistoricalDraw, PayoutTable, Ticket};

/// Strategy: up to 5 distinct numbers from 1..=49.
fn number_set_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(1..=49u8, 0..=5).prop_map(|s| s.into_iter().collect())
}

/// Strategy: a valid ticket.
fn ticket_strategy() -> impl Strategy<Value = Ticket> {
    (
        prop::sample::subsequence((1..=49u8).collect::<Vec<_>>(), 5).prop_shuffle(),
        1..=10u8,
    )
        .prop_map(|(numbers, lucky)| Ticket::new(&numbers, lucky).unwrap())
}

/// Strategy: a draw with arbitrary non-negative payouts.
fn draw_strategy() -> impl Strategy<Value = HistoricalDraw> {
    (
        prop::sample::subsequence((1..=49u8).collect::<Vec<_>>(), 5),
        1..=10u8,
        prop::array::uniform9(0.0..1_000_000.0f64),
        0..3000u64,
    )
        .prop_map(|(numbers, chance, payouts, day)| {
            let date = NaiveDate::from_ymd_opt(2017, 3, 6).unwrap() + chrono::Days::new(day);
            let numbers: [u8; 5] = numbers.try_into().unwrap();
            HistoricalDraw::new(date, numbers, chance, PayoutTable(payouts))
        })
}

proptest! {
    // 1. Packing then reading the bits back recovers the set
    #[test]
    fn pack_round_trip(set in number_set_strategy()) {
        prop_assert_eq!(pack(&set).numbers(), set);
    }

    // 2. Table popcount agrees with the hardware count
    #[test]
    fn popcount_matches_count_ones(word in any::<u32>()) {
        prop_assert_eq!(popcount32(word), word.count_ones());
    }

    // 3. Packed size equals set size
    #[test]
    fn pack_count_is_set_size(set in number_set_strategy()) {
        prop_assert_eq!(pack(&set).count() as usize, set.len());
    }

    // 4. Mask intersection counts the same numbers as a naive set intersection
    #[test]
    fn match_count_matches_naive(ticket in ticket_strategy(), draw in draw_strategy()) {
        let naive = ticket.numbers().iter().filter(|&&n| draw.numbers.contains(&n)).count();
        let r = evaluate(ticket.mask(), &draw, ticket.lucky_number());
        prop_assert_eq!(r.match_count as usize, naive);
        prop_assert_eq!(r.matching_numbers.len(), naive);
        prop_assert_eq!(r.lucky_match, ticket.lucky_number() == draw.chance);
    }

    // 5. Evaluation is pure
    #[test]
    fn evaluate_deterministic(ticket in ticket_strategy(), draw in draw_strategy()) {
        let a = evaluate(ticket.mask(), &draw, ticket.lucky_number());
        let b = evaluate(ticket.mask(), &draw, ticket.lucky_number());
        prop_assert_eq!(a, b);
    }

    // 6. Payout is one of the 9 ranks or 0
    #[test]
    fn resolve_is_rank_or_zero(
        m in 0..=5u32,
        lucky in any::<bool>(),
        payouts in prop::array::uniform9(0.0..1_000.0f64),
    ) {
        let table = PayoutTable(payouts);
        let amount = resolve(m, lucky, &table);
        match rank_for(m, lucky) {
            Some(rank) => prop_assert_eq!(amount, payouts[rank - 1]),
            None => prop_assert_eq!(amount, 0.0),
        }
    }

    // 7. The allocation-free total equals the sum of per-draw payouts
    #[test]
    fn total_payout_is_sum(
        ticket in ticket_strategy(),
        draws in prop::collection::vec(draw_strategy(), 0..20),
    ) {
        let summed: f64 = draws
            .iter()
            .map(|d| evaluate(ticket.mask(), d, ticket.lucky_number()).payout)
            .sum();
        let total = total_payout(ticket.mask(), ticket.lucky_number(), &draws);
        prop_assert!((total - summed).abs() <= 1e-6 * summed.max(1.0));
    }
}
