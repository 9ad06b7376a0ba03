//! Command handlers for the Character Management context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate the command, call the store, and map
//! absence to `DomainError::NotFound`.

use questboard_core::error::DomainError;
use questboard_core::validation::{require_length, require_positive};
use tracing::info;

use crate::domain::aggregates::Character;
use crate::domain::commands::{AwardExperience, CreateCharacter, UpdateCharacter};
use crate::domain::repository::{CharacterChanges, CharacterRepository, NewCharacter};

/// Minimum length of a character name or class.
pub const MIN_FIELD_LEN: usize = 2;
/// Maximum length of a character name or class.
pub const MAX_FIELD_LEN: usize = 50;

/// Handles the `CreateCharacter` command: validates the fields and persists a
/// level 1 character.
///
/// # Errors
///
/// Returns `DomainError::Validation` for out-of-range fields, or any store
/// error.
pub async fn handle_create_character(
    command: &CreateCharacter,
    repo: &dyn CharacterRepository,
) -> Result<Character, DomainError> {
    let new = NewCharacter {
        name: require_length("name", &command.name, MIN_FIELD_LEN, MAX_FIELD_LEN)?,
        class: require_length("class", &command.class, MIN_FIELD_LEN, MAX_FIELD_LEN)?,
    };

    repo.create_character(&new).await
}

/// Handles the `UpdateCharacter` command: validates whichever fields are
/// present and applies them.
///
/// # Errors
///
/// Returns `DomainError::Validation` for out-of-range fields,
/// `DomainError::NotFound` if the character does not exist, or any store
/// error.
pub async fn handle_update_character(
    command: &UpdateCharacter,
    repo: &dyn CharacterRepository,
) -> Result<Character, DomainError> {
    let changes = CharacterChanges {
        name: command
            .name
            .as_deref()
            .map(|name| require_length("name", name, MIN_FIELD_LEN, MAX_FIELD_LEN))
            .transpose()?,
        class: command
            .class
            .as_deref()
            .map(|class| require_length("class", class, MIN_FIELD_LEN, MAX_FIELD_LEN))
            .transpose()?,
    };

    repo.update_character(command.character_id, &changes)
        .await?
        .ok_or_else(|| DomainError::character_not_found(command.character_id))
}

/// Handles the `AwardExperience` command: adds experience through the store,
/// which recomputes the level atomically.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the amount is not positive,
/// `DomainError::NotFound` if the character does not exist, or any store
/// error.
pub async fn handle_award_experience(
    command: &AwardExperience,
    repo: &dyn CharacterRepository,
) -> Result<Character, DomainError> {
    let amount = require_positive("experience amount", command.amount)?;

    let character = repo
        .add_experience(command.character_id, amount)
        .await?
        .ok_or_else(|| DomainError::character_not_found(command.character_id))?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = character.id,
        experience = character.experience,
        level = character.level,
        "experience awarded"
    );

    Ok(character)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use questboard_core::error::DomainError;
    use questboard_core::types::{CharacterId, Page};
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_award_experience, handle_create_character, handle_update_character,
    };
    use crate::domain::aggregates::Character;
    use crate::domain::commands::{AwardExperience, CreateCharacter, UpdateCharacter};
    use crate::domain::repository::{CharacterChanges, CharacterRepository, NewCharacter};

    /// Single-slot store that records what it was asked to persist.
    #[derive(Debug, Default)]
    struct StubCharacterRepository {
        stored: Mutex<Option<Character>>,
        created: Mutex<Vec<NewCharacter>>,
    }

    impl StubCharacterRepository {
        fn with(character: Character) -> Self {
            Self {
                stored: Mutex::new(Some(character)),
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CharacterRepository for StubCharacterRepository {
        async fn create_character(&self, new: &NewCharacter) -> Result<Character, DomainError> {
            self.created.lock().unwrap().push(new.clone());
            let character = Character::new(1, new.name.clone(), new.class.clone());
            *self.stored.lock().unwrap() = Some(character.clone());
            Ok(character)
        }

        async fn get_character(
            &self,
            id: CharacterId,
        ) -> Result<Option<Character>, DomainError> {
            Ok(self.stored.lock().unwrap().clone().filter(|c| c.id == id))
        }

        async fn list_characters(&self, _page: Page) -> Result<Vec<Character>, DomainError> {
            Ok(self.stored.lock().unwrap().clone().into_iter().collect())
        }

        async fn update_character(
            &self,
            id: CharacterId,
            changes: &CharacterChanges,
        ) -> Result<Option<Character>, DomainError> {
            let mut stored = self.stored.lock().unwrap();
            Ok(stored.as_mut().filter(|c| c.id == id).map(|c| {
                if let Some(name) = &changes.name {
                    c.name.clone_from(name);
                }
                if let Some(class) = &changes.class {
                    c.class.clone_from(class);
                }
                c.clone()
            }))
        }

        async fn delete_character(&self, id: CharacterId) -> Result<bool, DomainError> {
            let mut stored = self.stored.lock().unwrap();
            Ok(stored.take_if(|c| c.id == id).is_some())
        }

        async fn add_experience(
            &self,
            id: CharacterId,
            amount: i64,
        ) -> Result<Option<Character>, DomainError> {
            let mut stored = self.stored.lock().unwrap();
            Ok(stored.as_mut().filter(|c| c.id == id).map(|c| {
                c.gain_experience(amount);
                c.clone()
            }))
        }
    }

    fn gandalf() -> Character {
        Character::new(1, "Gandalf".to_owned(), "Mage".to_owned())
    }

    #[tokio::test]
    async fn test_handle_create_character_persists_trimmed_fields() {
        // Arrange
        let repo = StubCharacterRepository::default();
        let command = CreateCharacter {
            correlation_id: Uuid::new_v4(),
            name: "  Aragorn ".to_owned(),
            class: "Warrior".to_owned(),
        };

        // Act
        let character = handle_create_character(&command, &repo).await.unwrap();

        // Assert
        assert_eq!(character.name, "Aragorn");
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 0);
        let created = repo.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Aragorn");
        assert_eq!(created[0].class, "Warrior");
    }

    #[tokio::test]
    async fn test_handle_create_character_rejects_short_name() {
        // Arrange
        let repo = StubCharacterRepository::default();
        let command = CreateCharacter {
            correlation_id: Uuid::new_v4(),
            name: "A".to_owned(),
            class: "Warrior".to_owned(),
        };

        // Act
        let result = handle_create_character(&command, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "name must be between 2 and 50 characters, got 1");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(repo.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_create_character_rejects_long_class() {
        // Arrange
        let repo = StubCharacterRepository::default();
        let command = CreateCharacter {
            correlation_id: Uuid::new_v4(),
            name: "Aragorn".to_owned(),
            class: "x".repeat(51),
        };

        // Act
        let result = handle_create_character(&command, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_update_character_applies_present_fields_only() {
        // Arrange
        let repo = StubCharacterRepository::with(gandalf());
        let command = UpdateCharacter {
            correlation_id: Uuid::new_v4(),
            character_id: 1,
            name: Some("Gandalf the White".to_owned()),
            class: None,
        };

        // Act
        let character = handle_update_character(&command, &repo).await.unwrap();

        // Assert
        assert_eq!(character.name, "Gandalf the White");
        assert_eq!(character.class, "Mage");
    }

    #[tokio::test]
    async fn test_handle_update_character_returns_not_found() {
        // Arrange
        let repo = StubCharacterRepository::default();
        let command = UpdateCharacter {
            correlation_id: Uuid::new_v4(),
            character_id: 42,
            name: Some("Nobody".to_owned()),
            class: None,
        };

        // Act
        let result = handle_update_character(&command, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "character");
                assert_eq!(id, 42);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_award_experience_levels_up() {
        // Arrange
        let repo = StubCharacterRepository::with(gandalf());
        let command = AwardExperience {
            correlation_id: Uuid::new_v4(),
            character_id: 1,
            amount: 250,
        };

        // Act
        let character = handle_award_experience(&command, &repo).await.unwrap();

        // Assert
        assert_eq!(character.experience, 250);
        assert_eq!(character.level, 3);
    }

    #[tokio::test]
    async fn test_handle_award_experience_rejects_zero_amount() {
        // Arrange
        let repo = StubCharacterRepository::with(gandalf());
        let command = AwardExperience {
            correlation_id: Uuid::new_v4(),
            character_id: 1,
            amount: 0,
        };

        // Act
        let result = handle_award_experience(&command, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "experience amount must be greater than zero");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        let stored = repo.stored.lock().unwrap().clone().unwrap();
        assert_eq!(stored.experience, 0);
    }
}
