//! Command handlers for the Quest Catalog context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate the command, call the store, and map
//! absence to `DomainError::NotFound`.

use questboard_core::clock::Clock;
use questboard_core::error::DomainError;
use questboard_core::validation::{require_length, require_positive};
use tracing::info;

use crate::domain::aggregates::{Quest, QuestStatus};
use crate::domain::commands::{CreateQuest, DeleteQuest, UpdateQuest};
use crate::domain::repository::{NewQuest, QuestChanges, QuestRepository};

/// Minimum length of a quest name.
pub const MIN_NAME_LEN: usize = 3;
/// Maximum length of a quest name.
pub const MAX_NAME_LEN: usize = 50;
/// Minimum length of a quest description.
pub const MIN_DESCRIPTION_LEN: usize = 10;
/// Maximum length of a quest description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

fn validate_name(name: &str) -> Result<String, DomainError> {
    require_length("name", name, MIN_NAME_LEN, MAX_NAME_LEN)
}

fn validate_description(description: &str) -> Result<String, DomainError> {
    require_length(
        "description",
        description,
        MIN_DESCRIPTION_LEN,
        MAX_DESCRIPTION_LEN,
    )
}

/// Handles the `CreateQuest` command: validates the fields, stamps the
/// creation time from `clock`, and persists a `Pending` quest.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields, or any store
/// error.
pub async fn handle_create_quest(
    command: &CreateQuest,
    clock: &dyn Clock,
    repo: &dyn QuestRepository,
) -> Result<Quest, DomainError> {
    let new = NewQuest {
        name: validate_name(&command.name)?,
        description: validate_description(&command.description)?,
        experience: require_positive("experience", command.experience)?,
        created_at: clock.now(),
    };

    let quest = repo.create_quest(&new).await?;

    info!(
        correlation_id = %command.correlation_id,
        quest_id = quest.id,
        "quest created"
    );

    Ok(quest)
}

/// Handles the `UpdateQuest` command.
///
/// A completed quest keeps its status. A quest can only enter or leave
/// `InProgress` through accepting and completing it, since an in-progress
/// quest sits in exactly one character's queue.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the quest does not exist,
/// `DomainError::InvalidState` when changing the status of a completed quest
/// or moving a quest into or out of `InProgress`, or any store error.
pub async fn handle_update_quest(
    command: &UpdateQuest,
    repo: &dyn QuestRepository,
) -> Result<Quest, DomainError> {
    let changes = QuestChanges {
        name: command.name.as_deref().map(validate_name).transpose()?,
        description: command
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?,
        experience: command
            .experience
            .map(|experience| require_positive("experience", experience))
            .transpose()?,
        status: command.status,
    };

    if let Some(status) = changes.status {
        let current = repo
            .get_quest(command.quest_id)
            .await?
            .ok_or_else(|| DomainError::quest_not_found(command.quest_id))?;
        if status != current.status {
            if current.status.is_terminal() {
                return Err(DomainError::InvalidState(format!(
                    "quest {} is already {} and cannot move to {status}",
                    current.id, current.status
                )));
            }
            if current.status == QuestStatus::InProgress || status == QuestStatus::InProgress {
                return Err(DomainError::InvalidState(format!(
                    "quest {} cannot move from {} to {status} outside of accept and complete",
                    current.id, current.status
                )));
            }
        }
    }

    repo.update_quest(command.quest_id, &changes)
        .await?
        .ok_or_else(|| DomainError::quest_not_found(command.quest_id))
}

/// Handles the `DeleteQuest` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist, or any store
/// error.
pub async fn handle_delete_quest(
    command: &DeleteQuest,
    repo: &dyn QuestRepository,
) -> Result<(), DomainError> {
    if !repo.delete_quest(command.quest_id).await? {
        return Err(DomainError::quest_not_found(command.quest_id));
    }

    info!(
        correlation_id = %command.correlation_id,
        quest_id = command.quest_id,
        "quest deleted"
    );

    Ok(())
}
