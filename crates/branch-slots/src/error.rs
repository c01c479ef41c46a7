//! Error types for branch-slots operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid slot time: {0}")]
    InvalidTime(String),

    #[error("Invalid operating hours: {0}")]
    InvalidHours(String),

    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown topic: {0}")]
    UnknownTopic(u32),

    #[error("Unknown branch: {0}")]
    UnknownBranch(u32),

    #[error("Branch {branch_id} does not offer topic {topic_id}")]
    BranchDoesNotServeTopic { branch_id: u32, topic_id: u32 },

    #[error("Date {date} is outside the bookable range {min} to {max}")]
    DateOutOfRange {
        date: String,
        min: String,
        max: String,
    },

    #[error("Slot {time} on {date} is not available")]
    SlotUnavailable { date: String, time: String },

    #[error("Slot {time} on {date} is already booked for branch {branch_id}")]
    SlotTaken {
        branch_id: u32,
        date: String,
        time: String,
    },
}

pub type Result<T> = std::result::Result<T, BookingError>;
