//! Selection and results state for one user session.
//!
//! Nothing here recomputes on its own: callers trigger recomputation
//! explicitly (selection changed, sort changed, search outcome applied).
//! Every change is announced on a broadcast channel so views can refresh.

use std::sync::Arc;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::constants::*;
use crate::evaluator::{evaluate_ticket, summarize, ResultsSummary};
use crate::sampler::random_ticket;
use crate::types::{EvaluationResult, HistoricalDraw, SearchOutcome, Ticket};

const EVENT_CAPACITY: usize = 64;

/// Result table column to sort on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[serde(alias = "Date")]
    Date,
    #[serde(alias = "Gain")]
    Gain,
}

impl SortColumn {
    /// Order applied when switching to this column.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortColumn::Date => SortOrder::Asc,
            SortColumn::Gain => SortOrder::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Change notifications emitted by [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SelectionChanged,
    ResultsChanged,
    SortChanged,
    MessageChanged,
    DrawsChanged,
    Reset,
}

/// Current selection, evaluated results and sort order.
pub struct Session {
    draws: Arc<Vec<HistoricalDraw>>,
    selected_numbers: Vec<u8>,
    selected_lucky_number: Option<u8>,
    results: Vec<EvaluationResult>,
    sort_column: SortColumn,
    sort_order: SortOrder,
    message: String,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(draws: Arc<Vec<HistoricalDraw>>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            draws,
            selected_numbers: Vec::with_capacity(SELECTION_COUNT),
            selected_lucky_number: None,
            results: Vec::new(),
            sort_column: SortColumn::Date,
            sort_order: SortOrder::Desc,
            message: String::new(),
            events,
        }
    }

    /// Receive every subsequent change notification.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub fn draws(&self) -> &[HistoricalDraw] {
        &self.draws
    }

    pub fn selected_numbers(&self) -> &[u8] {
        &self.selected_numbers
    }

    pub fn selected_lucky_number(&self) -> Option<u8> {
        self.selected_lucky_number
    }

    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    pub fn sort_column(&self) -> SortColumn {
        self.sort_column
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_selection_complete(&self) -> bool {
        self.selected_numbers.len() == SELECTION_COUNT && self.selected_lucky_number.is_some()
    }

    /// The selection as a ticket, if complete and valid.
    pub fn ticket(&self) -> Option<Ticket> {
        let lucky = self.selected_lucky_number?;
        Ticket::new(&self.selected_numbers, lucky).ok()
    }

    /// Deselect `n` if selected, otherwise select it while fewer than 5 are chosen.
    pub fn toggle_number(&mut self, n: u8) {
        if !is_valid_number(n) {
            return;
        }
        if let Some(pos) = self.selected_numbers.iter().position(|&x| x == n) {
            self.selected_numbers.remove(pos);
        } else if self.selected_numbers.len() < SELECTION_COUNT {
            self.selected_numbers.push(n);
        } else {
            return;
        }
        self.notify(SessionEvent::SelectionChanged);
    }

    pub fn select_lucky_number(&mut self, n: u8) {
        if !is_valid_lucky_number(n) {
            return;
        }
        self.selected_lucky_number = Some(n);
        self.notify(SessionEvent::SelectionChanged);
    }

    pub fn set_selection(&mut self, ticket: &Ticket) {
        self.selected_numbers = ticket.numbers().to_vec();
        self.selected_lucky_number = Some(ticket.lucky_number());
        self.notify(SessionEvent::SelectionChanged);
    }

    /// Replace the selection with a random ticket.
    pub fn randomize_selection<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let ticket = random_ticket(rng);
        self.set_selection(&ticket);
    }

    /// Evaluate the selection against every draw.
    ///
    /// Returns false and changes nothing when the selection is incomplete.
    /// On success the sort resets to date, newest first.
    pub fn calculate_results(&mut self) -> bool {
        let Some(ticket) = self.ticket() else {
            return false;
        };
        self.set_message(String::new());
        self.results = evaluate_ticket(&ticket, &self.draws);
        debug!(
            "evaluated {:?}+{} against {} draws",
            ticket.numbers(),
            ticket.lucky_number(),
            self.draws.len()
        );
        self.sort_column = SortColumn::Date;
        self.sort_order = SortOrder::Desc;
        self.sort_results();
        self.notify(SessionEvent::ResultsChanged);
        true
    }

    /// Same column flips the order; a new column starts at its default order.
    pub fn sort_by(&mut self, column: SortColumn) {
        let order = if column == self.sort_column {
            self.sort_order.flipped()
        } else {
            column.default_order()
        };
        self.sort_with(column, order);
    }

    pub fn sort_with(&mut self, column: SortColumn, order: SortOrder) {
        self.sort_column = column;
        self.sort_order = order;
        self.sort_results();
        self.notify(SessionEvent::SortChanged);
    }

    fn sort_results(&mut self) {
        let order = self.sort_order;
        let by_date = self.sort_column == SortColumn::Date;
        self.results.sort_by(|a, b| {
            let ord = if by_date {
                a.draw.date.cmp(&b.draw.date)
            } else {
                a.payout.total_cmp(&b.payout)
            };
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    /// Show the found ticket's results, or explain why there are none.
    pub fn apply_search_outcome(&mut self, outcome: &SearchOutcome) {
        if let SearchOutcome::Found { ticket, .. } = outcome {
            self.set_selection(ticket);
            self.calculate_results();
        }
        self.set_message(outcome.message());
    }

    /// Swap the draw history; visible results are recomputed against it.
    pub fn set_draws(&mut self, draws: Arc<Vec<HistoricalDraw>>) {
        self.draws = draws;
        self.notify(SessionEvent::DrawsChanged);
        if !self.results.is_empty() && !self.calculate_results() {
            self.results.clear();
            self.notify(SessionEvent::ResultsChanged);
        }
    }

    pub fn reset(&mut self) {
        self.selected_numbers.clear();
        self.selected_lucky_number = None;
        self.results.clear();
        self.message.clear();
        self.sort_column = SortColumn::Date;
        self.sort_order = SortOrder::Desc;
        self.notify(SessionEvent::Reset);
    }

    pub fn summary(&self) -> ResultsSummary {
        summarize(&self.results, self.draws.len())
    }

    fn set_message(&mut self, message: String) {
        if self.message != message {
            self.message = message;
            self.notify(SessionEvent::MessageChanged);
        }
    }
}
