//! Quest store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page, QuestId};

use super::aggregates::{AssignedQuest, Assignment, Quest, QuestStatus};

/// Validated fields for a quest about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuest {
    /// Short title.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Experience reward.
    pub experience: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Partial update of a quest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestChanges {
    /// New title, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New reward, if changing.
    pub experience: Option<i64>,
    /// New status, if changing.
    pub status: Option<QuestStatus>,
}

/// Repository trait for persisting quests and their assignments.
///
/// Lookups report absence as `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// infrastructure failures.
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Persist a new quest. The stored status is always `Pending`.
    async fn create_quest(&self, new: &NewQuest) -> Result<Quest, DomainError>;

    /// Load a quest by id.
    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, DomainError>;

    /// List quests ordered by id.
    async fn list_quests(&self, page: Page) -> Result<Vec<Quest>, DomainError>;

    /// List every quest with the given status, ordered by id.
    async fn list_quests_by_status(&self, status: QuestStatus)
    -> Result<Vec<Quest>, DomainError>;

    /// Apply a partial update.
    async fn update_quest(
        &self,
        id: QuestId,
        changes: &QuestChanges,
    ) -> Result<Option<Quest>, DomainError>;

    /// Overwrite the status unconditionally.
    async fn update_quest_status(
        &self,
        id: QuestId,
        status: QuestStatus,
    ) -> Result<Option<Quest>, DomainError>;

    /// Move the quest from `from` to `to` only if it is currently in `from`.
    ///
    /// Returns `None` when the quest is absent or in another status.
    async fn transition_quest_status(
        &self,
        id: QuestId,
        from: QuestStatus,
        to: QuestStatus,
    ) -> Result<Option<Quest>, DomainError>;

    /// Delete a quest and its assignments. Returns `false` if it did not exist.
    async fn delete_quest(&self, id: QuestId) -> Result<bool, DomainError>;

    /// Link a quest to a character, returning the existing link if present.
    async fn create_assignment(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> Result<Assignment, DomainError>;

    /// Remove every link held by a character, returning how many were removed.
    async fn delete_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<u64, DomainError>;

    /// List a character's assignments with their quests, oldest first.
    async fn list_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AssignedQuest>, DomainError>;
}
