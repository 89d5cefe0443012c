//! # Errors
//!
//! Construction fails with [`ValidationError`]; lookups of unknown sections
//! fail with [`NotFoundError`]. Both are synchronous and never retried.

use thiserror::Error;

/// Rejected section list at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("section at position {position} has no name")]
    MissingName { position: usize },

    #[error("section at position {position} has an empty name")]
    EmptyName { position: usize },

    #[error("section name `{name}` is repeated")]
    DuplicateName { name: String },

    #[error("section `{name}` has range {range}, expected a positive range")]
    NonPositiveRange { name: String, range: i64 },

    #[error("section `{name}` starts at {value}, outside 0..{range}")]
    ValueOutOfRange { name: String, value: i64, range: i64 },

    /// The excess entry may only lead the list, where it replaces the implicit one
    #[error("excess section at position {position}, only allowed at position 0")]
    MisplacedExcess { position: usize },

    #[error("a counter needs at least one named section")]
    NoSections,
}

/// A section name that is not part of the counter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no section named `{name}`")]
pub struct NotFoundError {
    pub name: String,
}

impl NotFoundError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A write whose carry does not fit a section value
///
/// The counter is left exactly as it was before the write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("carry overflowed section `{section}`")]
pub struct OverflowError {
    pub section: String,
}

impl OverflowError {
    pub fn new(section: impl Into<String>) -> Self {
        Self { section: section.into() }
    }
}

/// Any error the counter can raise
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

/// Result type for counter operations
pub type CounterResult<T> = Result<T, CounterError>;
