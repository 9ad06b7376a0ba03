//! Character store abstraction.

use async_trait::async_trait;
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page};

use super::aggregates::Character;

/// Validated fields for a character about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    /// Display name.
    pub name: String,
    /// Class tag.
    pub class: String,
}

/// Partial update of a character's descriptive fields.
///
/// Level and experience are deliberately absent: they only move through
/// [`CharacterRepository::add_experience`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterChanges {
    /// New name, if changing.
    pub name: Option<String>,
    /// New class, if changing.
    pub class: Option<String>,
}

/// Repository trait for persisting characters.
///
/// Lookups report absence as `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// infrastructure failures.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Persist a new character at level 1 with no experience.
    async fn create_character(&self, new: &NewCharacter) -> Result<Character, DomainError>;

    /// Load a character by id.
    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, DomainError>;

    /// List characters ordered by id.
    async fn list_characters(&self, page: Page) -> Result<Vec<Character>, DomainError>;

    /// Apply a partial update.
    async fn update_character(
        &self,
        id: CharacterId,
        changes: &CharacterChanges,
    ) -> Result<Option<Character>, DomainError>;

    /// Delete a character. Returns `false` if it did not exist.
    async fn delete_character(&self, id: CharacterId) -> Result<bool, DomainError>;

    /// Atomically add experience and recompute the level.
    async fn add_experience(
        &self,
        id: CharacterId,
        amount: i64,
    ) -> Result<Option<Character>, DomainError>;
}
