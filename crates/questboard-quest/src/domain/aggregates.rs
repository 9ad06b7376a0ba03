//! Aggregate roots for the Quest Catalog context.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, QuestId};
use serde::{Deserialize, Serialize};

/// Workflow stage of a quest.
///
/// The wire and column representation keeps the reference vocabulary
/// (`pendiente`, `en_progreso`, `completada`); everything else works with the
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    /// Created and waiting to be accepted.
    #[serde(rename = "pendiente")]
    Pending,
    /// Accepted by exactly one character and sitting in its queue.
    #[serde(rename = "en_progreso")]
    InProgress,
    /// Finished; terminal.
    #[serde(rename = "completada")]
    Completed,
}

impl QuestStatus {
    /// Returns the persisted/wire string for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InProgress => "en_progreso",
            Self::Completed => "completada",
        }
    }

    /// Completed quests never change status again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "en_progreso" => Ok(Self::InProgress),
            "completada" => Ok(Self::Completed),
            other => Err(DomainError::Validation(format!(
                "unknown quest status: {other}"
            ))),
        }
    }
}

/// The aggregate root for a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Quest identifier.
    pub id: QuestId,
    /// Short title.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Experience granted on completion, always positive.
    pub experience: i64,
    /// Current workflow stage.
    pub status: QuestStatus,
    /// When the quest was created.
    pub created_at: DateTime<Utc>,
}

/// Link recording that a character took a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment identifier.
    pub id: i64,
    /// The quest taken.
    pub quest_id: QuestId,
    /// The character that took it.
    pub character_id: CharacterId,
}

/// An assignment together with the quest it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedQuest {
    /// Assignment identifier.
    pub assignment_id: i64,
    /// The character holding the assignment.
    pub character_id: CharacterId,
    /// The assigned quest as currently persisted.
    pub quest: Quest,
}
