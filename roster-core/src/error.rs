//! Error types for roster feed generation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a roster feed.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Roster day {offset} from epoch {epoch} is outside the supported date range")]
    DateOutOfRange { epoch: NaiveDate, offset: i64 },

    #[error("Window of {cycles} cycles exceeds the limit of {max}")]
    WindowTooLarge { cycles: i64, max: i64 },

    #[error("No calendar day follows {0}")]
    NoFollowingDay(NaiveDate),
}

/// Result type alias for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
