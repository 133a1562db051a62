use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::bitmask::{pack, Bitmask};
use crate::constants::*;
use crate::error::{LotoError, Result};

/// Date format of the draw history feed (`DD/MM/YYYY`).
pub const DRAW_DATE_FORMAT: &str = "%d/%m/%Y";

fn serialize_draw_date<S: Serializer>(date: &NaiveDate, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(&date.format(DRAW_DATE_FORMAT))
}

/// A played grid: 5 distinct main numbers and one lucky number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ticket {
    numbers: [u8; SELECTION_COUNT],
    lucky_number: u8,
}

impl Ticket {
    /// Build a ticket, checking ranges and distinctness.
    pub fn new(numbers: &[u8], lucky_number: u8) -> Result<Self> {
        if numbers.len() != SELECTION_COUNT {
            return Err(LotoError::WrongNumberCount(numbers.len()));
        }
        let mut arr = [0u8; SELECTION_COUNT];
        for (i, &n) in numbers.iter().enumerate() {
            if !is_valid_number(n) {
                return Err(LotoError::NumberOutOfRange(n));
            }
            if arr[..i].contains(&n) {
                return Err(LotoError::DuplicateNumber(n));
            }
            arr[i] = n;
        }
        if !is_valid_lucky_number(lucky_number) {
            return Err(LotoError::LuckyNumberOutOfRange(lucky_number));
        }
        Ok(Self {
            numbers: arr,
            lucky_number,
        })
    }

    /// Caller guarantees the ticket invariant (used by the sampler).
    pub(crate) fn from_parts(numbers: [u8; SELECTION_COUNT], lucky_number: u8) -> Self {
        debug_assert!(numbers.iter().all(|&n| is_valid_number(n)));
        debug_assert!(is_valid_lucky_number(lucky_number));
        Self {
            numbers,
            lucky_number,
        }
    }

    /// Main numbers in the order they were chosen.
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn lucky_number(&self) -> u8 {
        self.lucky_number
    }

    pub fn mask(&self) -> Bitmask {
        pack(&self.numbers)
    }
}

/// Payout per rank for one draw (`rang1..rang9`), 0 when unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PayoutTable(pub [f64; RANK_COUNT]);

impl PayoutTable {
    /// Amount paid for `rank` (1-based). Unknown ranks pay 0.
    #[inline(always)]
    pub fn rank(&self, rank: usize) -> f64 {
        match rank {
            1..=RANK_COUNT => self.0[rank - 1],
            _ => 0.0,
        }
    }

    /// Builder-style setter for a single rank (1-based).
    pub fn with_rank(mut self, rank: usize, amount: f64) -> Self {
        if (1..=RANK_COUNT).contains(&rank) {
            self.0[rank - 1] = amount;
        }
        self
    }
}

/// One historical draw, packed once at load time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoricalDraw {
    #[serde(serialize_with = "serialize_draw_date")]
    pub date: NaiveDate,
    /// Winning numbers in feed order (ascending).
    pub numbers: [u8; SELECTION_COUNT],
    #[serde(flatten)]
    pub mask: Bitmask,
    /// Winning lucky number.
    pub chance: u8,
    pub payouts: PayoutTable,
}

impl HistoricalDraw {
    /// Build a draw from validated numbers; the mask is derived here.
    pub fn new(
        date: NaiveDate,
        numbers: [u8; SELECTION_COUNT],
        chance: u8,
        payouts: PayoutTable,
    ) -> Self {
        Self {
            date,
            numbers,
            mask: pack(&numbers),
            chance,
            payouts,
        }
    }
}

/// A draw evaluated against one ticket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationResult {
    #[serde(flatten)]
    pub draw: HistoricalDraw,
    pub match_count: u32,
    pub lucky_match: bool,
    /// Ticket numbers that appear in the draw, in selection order when
    /// evaluated from a [`Ticket`], ascending from a bare mask.
    pub matching_numbers: Vec<u8>,
    pub payout: f64,
}

/// Terminal state of a profitability search.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// `ticket` would have won more than it cost over the whole history.
    Found {
        ticket: Ticket,
        attempts: u32,
        total_won: f64,
        total_cost: f64,
    },
    /// No profitable ticket within the attempt cap.
    NotFound { attempts: u32 },
    /// The caller's cancellation flag was raised at a yield point.
    Cancelled { attempts: u32 },
}

impl SearchOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            SearchOutcome::Found { attempts, .. }
            | SearchOutcome::NotFound { attempts }
            | SearchOutcome::Cancelled { attempts } => *attempts,
        }
    }

    /// User-facing explanation of the outcome.
    pub fn message(&self) -> String {
        match self {
            SearchOutcome::Found { attempts, .. } => format!(
                "You would have needed to play {attempts} tickets to finally get a profitable one."
            ),
            SearchOutcome::NotFound { attempts } => {
                format!("No profitable ticket found after {attempts} attempts.")
            }
            SearchOutcome::Cancelled { attempts } => {
                format!("Search cancelled after {attempts} attempts.")
            }
        }
    }
}
