//! Error types for ticket validation and draw history ingestion.

use thiserror::Error;

/// Errors raised while building tickets or loading draw history.
#[derive(Debug, Error)]
pub enum LotoError {
    /// A main number outside 1..=49.
    #[error("number {0} is outside 1..=49")]
    NumberOutOfRange(u8),

    /// A lucky number outside 1..=10.
    #[error("lucky number {0} is outside 1..=10")]
    LuckyNumberOutOfRange(u8),

    /// A ticket or draw without exactly 5 main numbers.
    #[error("expected 5 numbers, got {0}")]
    WrongNumberCount(usize),

    /// The same main number appears twice.
    #[error("number {0} appears more than once")]
    DuplicateNumber(u8),

    /// The feed header lacks a required column.
    #[error("missing column `{0}` in draw history header")]
    MissingColumn(&'static str),

    /// The feed has no header row.
    #[error("draw history is empty")]
    EmptyInput,

    /// A data row could not be turned into a draw.
    #[error("line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    /// An I/O error occurred while reading the feed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for loto operations.
pub type Result<T> = std::result::Result<T, LotoError>;
