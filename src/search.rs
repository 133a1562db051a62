//! Profitability search: play random tickets against the full history until
//! one would have paid more than it cost.
//!
//! The search is bounded (`max_attempts`) and cooperative. [`ProfitSearch::step`]
//! runs one batch of attempts and reports whether it is done; the async driver
//! [`search_profitable`] yields to the tokio scheduler between batches so a long
//! search never starves other tasks on the same thread.
//!
//! Attempts run strictly in order and the first profitable one wins, so the
//! reported attempt count is the true number of tickets tried. Batching only
//! changes when the outcome is delivered, never what it is.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rand::Rng;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_ATTEMPTS, MAX_BATCH_SIZE, MAX_SEARCH_ATTEMPTS,
};
use crate::evaluator::{total_cost, total_payout};
use crate::sampler::random_ticket;
use crate::types::{HistoricalDraw, SearchOutcome};

/// Search limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_attempts: u32,
    /// Attempts per batch; 0 behaves as 1.
    pub batch_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SearchConfig {
    /// Clamp both limits to what the server accepts from a client.
    pub fn bounded(self) -> Self {
        Self {
            max_attempts: self.max_attempts.min(MAX_SEARCH_ATTEMPTS),
            batch_size: self.batch_size.min(MAX_BATCH_SIZE),
        }
    }
}

/// Result of one [`ProfitSearch::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    /// More batches remain; `attempts` tickets tried so far.
    Pending { attempts: u32 },
    Done(SearchOutcome),
}

/// Resumable search state over a borrowed draw history.
pub struct ProfitSearch<'a, R> {
    draws: &'a [HistoricalDraw],
    rng: R,
    config: SearchConfig,
    total_cost: f64,
    attempts: u32,
    outcome: Option<SearchOutcome>,
}

impl<'a, R: Rng> ProfitSearch<'a, R> {
    pub fn new(draws: &'a [HistoricalDraw], config: SearchConfig, rng: R) -> Self {
        Self {
            draws,
            rng,
            config,
            total_cost: total_cost(draws.len()),
            attempts: 0,
            outcome: None,
        }
    }

    /// Tickets tried so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run one batch. Once done, keeps returning the same outcome.
    pub fn step(&mut self) -> SearchStep {
        if let Some(outcome) = &self.outcome {
            return SearchStep::Done(outcome.clone());
        }

        let batch = self.config.batch_size.max(1);
        let batch_end = self
            .attempts
            .saturating_add(batch)
            .min(self.config.max_attempts);

        while self.attempts < batch_end {
            self.attempts += 1;
            let ticket = random_ticket(&mut self.rng);
            let total_won = total_payout(ticket.mask(), ticket.lucky_number(), self.draws);
            if total_won - self.total_cost > 0.0 {
                return self.finish(SearchOutcome::Found {
                    ticket,
                    attempts: self.attempts,
                    total_won,
                    total_cost: self.total_cost,
                });
            }
        }

        if self.attempts >= self.config.max_attempts {
            return self.finish(SearchOutcome::NotFound {
                attempts: self.config.max_attempts,
            });
        }
        debug!("search batch done, {} attempts so far", self.attempts);
        SearchStep::Pending {
            attempts: self.attempts,
        }
    }

    /// Drive every batch on the current thread without yielding.
    pub fn run_to_completion(mut self) -> SearchOutcome {
        loop {
            if let SearchStep::Done(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn finish(&mut self, outcome: SearchOutcome) -> SearchStep {
        info!(
            "profitability search over {} draws finished: {}",
            self.draws.len(),
            outcome.message()
        );
        self.outcome = Some(outcome.clone());
        SearchStep::Done(outcome)
    }
}

/// Run the search, yielding to the scheduler after every batch.
///
/// `cancel` is checked only at yield points; when set, the search stops with
/// [`SearchOutcome::Cancelled`].
pub async fn search_profitable<R: Rng>(
    draws: &[HistoricalDraw],
    config: SearchConfig,
    rng: R,
    cancel: Option<&AtomicBool>,
) -> SearchOutcome {
    let mut search = ProfitSearch::new(draws, config, rng);
    loop {
        match search.step() {
            SearchStep::Done(outcome) => return outcome,
            SearchStep::Pending { attempts } => {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    info!("profitability search cancelled after {attempts} attempts");
                    return SearchOutcome::Cancelled { attempts };
                }
                tokio::task::yield_now().await;
            }
        }
    }
}
