//! Ticket vs draw evaluation.
//!
//! Each draw carries its [`Bitmask`] from load time, so evaluating a ticket
//! costs two ANDs, two popcounts and one payout lookup per draw. A full
//! history of N draws is O(N).

use serde::Serialize;

use crate::bitmask::{popcount32, Bitmask};
use crate::constants::TICKET_PRICE;
use crate::payout::resolve;
use crate::types::{EvaluationResult, HistoricalDraw, Ticket};

/// Aggregates shown next to a result list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ResultsSummary {
    /// Ticket price times draws played; 0 until results exist.
    pub total_spent: f64,
    pub total_won: f64,
    /// Draws with a non-zero payout.
    pub games_won: usize,
    pub net_result: f64,
}

/// Match count and lucky flag for one draw.
#[inline(always)]
fn match_draw(ticket_mask: Bitmask, draw: &HistoricalDraw, ticket_lucky: u8) -> (u32, bool) {
    let match_count = popcount32(ticket_mask.low & draw.mask.low)
        + popcount32(ticket_mask.high & draw.mask.high);
    (match_count, ticket_lucky == draw.chance)
}

fn build_result(
    ticket_mask: Bitmask,
    draw: &HistoricalDraw,
    ticket_lucky: u8,
    matching_numbers: Vec<u8>,
) -> EvaluationResult {
    let (match_count, lucky_match) = match_draw(ticket_mask, draw, ticket_lucky);
    EvaluationResult {
        draw: draw.clone(),
        match_count,
        lucky_match,
        matching_numbers,
        payout: resolve(match_count, lucky_match, &draw.payouts),
    }
}

/// Evaluate one packed ticket against one draw. Only the mask is known here,
/// so matching numbers come back ascending.
pub fn evaluate(ticket_mask: Bitmask, draw: &HistoricalDraw, ticket_lucky: u8) -> EvaluationResult {
    let matching = ticket_mask.intersect(draw.mask).numbers();
    build_result(ticket_mask, draw, ticket_lucky, matching)
}

/// Evaluate a ticket against every draw, keeping draw order. Matching numbers
/// keep the order the player chose them in.
pub fn evaluate_ticket(ticket: &Ticket, draws: &[HistoricalDraw]) -> Vec<EvaluationResult> {
    let mask = ticket.mask();
    draws
        .iter()
        .map(|draw| {
            let matching = ticket
                .numbers()
                .iter()
                .copied()
                .filter(|&n| draw.mask.contains(n))
                .collect();
            build_result(mask, draw, ticket.lucky_number(), matching)
        })
        .collect()
}

/// Sum of payouts over `draws`, without building results.
#[inline]
pub fn total_payout(ticket_mask: Bitmask, ticket_lucky: u8, draws: &[HistoricalDraw]) -> f64 {
    draws
        .iter()
        .map(|draw| {
            let (match_count, lucky_match) = match_draw(ticket_mask, draw, ticket_lucky);
            resolve(match_count, lucky_match, &draw.payouts)
        })
        .sum()
}

/// Cost of playing one ticket on each of `draw_count` draws.
#[inline]
pub fn total_cost(draw_count: usize) -> f64 {
    draw_count as f64 * TICKET_PRICE
}

/// Aggregate a result list. `draw_count` is the size of the evaluated history.
pub fn summarize(results: &[EvaluationResult], draw_count: usize) -> ResultsSummary {
    let total_spent = if results.is_empty() {
        0.0
    } else {
        total_cost(draw_count)
    };
    let total_won: f64 = results.iter().map(|r| r.payout).sum();
    let games_won = results.iter().filter(|r| r.payout > 0.0).count();
    ResultsSummary {
        total_spent,
        total_won,
        games_won,
        net_result: total_won - total_spent,
    }
}
