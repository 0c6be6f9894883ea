//! Error taxonomy
//!
//! The core owns no I/O, so the only failures are bad configuration handed to
//! the level assembler or a settings file that does not parse. Phase requests
//! never fail: out-of-phase requests are no-ops.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    /// `generate` was given an empty obstacle palette
    #[error("obstacle palette must contain at least one block kind")]
    EmptyPalette,

    /// `generate` was given a negative block count
    #[error("block count must be non-negative, got {0}")]
    InvalidBlockCount(i64),

    /// Settings failed to load, parse or validate
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CourseError>;
