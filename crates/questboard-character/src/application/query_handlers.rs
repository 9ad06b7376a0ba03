//! Query handlers for the Character Management context.

use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page};

use crate::domain::aggregates::Character;
use crate::domain::repository::CharacterRepository;

/// Retrieves a character by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character does not exist, or any
/// store error.
pub async fn get_character_by_id(
    character_id: CharacterId,
    repo: &dyn CharacterRepository,
) -> Result<Character, DomainError> {
    repo.get_character(character_id)
        .await?
        .ok_or_else(|| DomainError::character_not_found(character_id))
}

/// Lists characters in id order.
///
/// # Errors
///
/// Returns any store error.
pub async fn list_characters(
    page: Page,
    repo: &dyn CharacterRepository,
) -> Result<Vec<Character>, DomainError> {
    repo.list_characters(page).await
}
