//! Commands for the Quest Catalog context.

use questboard_core::types::QuestId;
use uuid::Uuid;

use super::aggregates::QuestStatus;

/// Command to create a new quest.
#[derive(Debug, Clone)]
pub struct CreateQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Short title.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Experience reward.
    pub experience: i64,
}

/// Command to edit a quest.
#[derive(Debug, Clone)]
pub struct UpdateQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quest identifier.
    pub quest_id: QuestId,
    /// New title, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New reward, if changing.
    pub experience: Option<i64>,
    /// New status, if changing.
    pub status: Option<QuestStatus>,
}

/// Command to delete a quest.
#[derive(Debug, Clone)]
pub struct DeleteQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quest identifier.
    pub quest_id: QuestId,
}
