//! # Loto — ticket evaluation against historical draws
//!
//! Replays a Loto ticket (5 numbers from 1..=49 plus a lucky number from
//! 1..=10) against every draw since the 2017 rules change and reports what it
//! would have won, and searches random tickets for one that would have paid
//! more than it cost.
//!
//! ## Pipeline
//!
//! | Step | Rust module | Description |
//! |------|-------------|-------------|
//! | Load | [`ingest`] | Parse the results feed, keep draws on or after 2017-03-06, pack each draw once |
//! | Pack | [`bitmask`] | Two `u32` words per number set, table-driven popcount |
//! | Pay | [`payout`] | (matches, lucky match) → rank 1..9 → amount |
//! | Evaluate | [`evaluator`] | One ticket vs every draw in O(1) per draw, totals |
//! | Search | [`search`], [`sampler`] | Bounded random search with cooperative yields |
//! | Present | [`session`], [`server`] | Selection/results state, sorting, HTTP API |
//!
//! ## Matching
//!
//! Ticket and draw are both bitmasks, so the number of common numbers is
//! `popcount32(t.low & d.low) + popcount32(t.high & d.high)`. Evaluating one
//! ticket against N draws is O(N) with no allocation on the search path
//! ([`evaluator::total_payout`]).

pub mod bitmask;
pub mod constants;
pub mod env_config;
pub mod error;
pub mod evaluator;
pub mod ingest;
pub mod payout;
pub mod sampler;
pub mod search;
pub mod server;
pub mod session;
pub mod types;

pub use error::{LotoError, Result};
