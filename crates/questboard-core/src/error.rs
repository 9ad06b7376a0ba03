//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Expected absence is never an error at the store level (lookups return
/// `Option`); `NotFound` is raised by operations that require an entity.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },

    /// The operation is not allowed in the entity's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a missing character.
    #[must_use]
    pub fn character_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "character",
            id,
        }
    }

    /// Shorthand for a missing quest.
    #[must_use]
    pub fn quest_not_found(id: i64) -> Self {
        Self::NotFound { entity: "quest", id }
    }
}
