//! `PostgreSQL` implementation of the `QuestRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page, QuestId};
use questboard_quest::domain::aggregates::{AssignedQuest, Assignment, Quest, QuestStatus};
use questboard_quest::domain::repository::{NewQuest, QuestChanges, QuestRepository};
use sqlx::PgPool;

use crate::error::infrastructure;

/// Column list for the `quests` table.
const COLUMNS: &str = "id, name, description, experience, status, created_at";

#[derive(Debug, sqlx::FromRow)]
struct QuestRow {
    id: i64,
    name: String,
    description: String,
    experience: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuestRow> for Quest {
    type Error = DomainError;

    fn try_from(row: QuestRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<QuestStatus>().map_err(|_| {
            DomainError::Infrastructure(format!(
                "quest {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            experience: row.experience,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: i64,
    quest_id: i64,
    character_id: i64,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: row.id,
            quest_id: row.quest_id,
            character_id: row.character_id,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignedQuestRow {
    assignment_id: i64,
    character_id: i64,
    #[sqlx(flatten)]
    quest: QuestRow,
}

fn quest_rows(rows: Vec<QuestRow>) -> Result<Vec<Quest>, DomainError> {
    rows.into_iter().map(Quest::try_from).collect()
}

fn quest_row(row: Option<QuestRow>) -> Result<Option<Quest>, DomainError> {
    row.map(Quest::try_from).transpose()
}

/// PostgreSQL-backed quest and assignment repository.
#[derive(Debug, Clone)]
pub struct PgQuestRepository {
    pool: PgPool,
}

impl PgQuestRepository {
    /// Creates a new `PgQuestRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestRepository for PgQuestRepository {
    async fn create_quest(&self, new: &NewQuest) -> Result<Quest, DomainError> {
        let query = format!(
            "INSERT INTO quests (name, description, experience, status, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QuestRow>(&query)
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.experience)
            .bind(QuestStatus::Pending.as_str())
            .bind(new.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure("create_quest"))?;
        Quest::try_from(row)
    }

    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM quests WHERE id = $1");
        let row = sqlx::query_as::<_, QuestRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure("get_quest"))?;
        quest_row(row)
    }

    async fn list_quests(&self, page: Page) -> Result<Vec<Quest>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM quests ORDER BY id OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, QuestRow>(&query)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure("list_quests"))?;
        quest_rows(rows)
    }

    async fn list_quests_by_status(
        &self,
        status: QuestStatus,
    ) -> Result<Vec<Quest>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM quests WHERE status = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, QuestRow>(&query)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure("list_quests_by_status"))?;
        quest_rows(rows)
    }

    async fn update_quest(
        &self,
        id: QuestId,
        changes: &QuestChanges,
    ) -> Result<Option<Quest>, DomainError> {
        let query = format!(
            "UPDATE quests \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 experience = COALESCE($4, experience), \
                 status = COALESCE($5, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QuestRow>(&query)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.experience)
            .bind(changes.status.map(QuestStatus::as_str))
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure("update_quest"))?;
        quest_row(row)
    }

    async fn update_quest_status(
        &self,
        id: QuestId,
        status: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        let query = format!("UPDATE quests SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, QuestRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure("update_quest_status"))?;
        quest_row(row)
    }

    async fn transition_quest_status(
        &self,
        id: QuestId,
        from: QuestStatus,
        to: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        let query = format!(
            "UPDATE quests SET status = $3 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QuestRow>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure("transition_quest_status"))?;
        quest_row(row)
    }

    async fn delete_quest(&self, id: QuestId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM quests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure("delete_quest"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_assignment(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> Result<Assignment, DomainError> {
        // The no-op DO UPDATE makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, AssignmentRow>(
            "INSERT INTO quest_character (quest_id, character_id) \
             VALUES ($1, $2) \
             ON CONFLICT (quest_id, character_id) \
             DO UPDATE SET quest_id = EXCLUDED.quest_id \
             RETURNING id, quest_id, character_id",
        )
        .bind(quest_id)
        .bind(character_id)
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure("create_assignment"))?;
        Ok(row.into())
    }

    async fn delete_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM quest_character WHERE character_id = $1")
            .bind(character_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure("delete_assignments_for_character"))?;
        Ok(result.rows_affected())
    }

    async fn list_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AssignedQuest>, DomainError> {
        let rows = sqlx::query_as::<_, AssignedQuestRow>(
            "SELECT qc.id AS assignment_id, qc.character_id, \
                    q.id, q.name, q.description, q.experience, q.status, q.created_at \
             FROM quest_character qc \
             JOIN quests q ON q.id = qc.quest_id \
             WHERE qc.character_id = $1 \
             ORDER BY qc.id",
        )
        .bind(character_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure("list_assignments_for_character"))?;

        rows.into_iter()
            .map(|row| {
                Ok(AssignedQuest {
                    assignment_id: row.assignment_id,
                    character_id: row.character_id,
                    quest: Quest::try_from(row.quest)?,
                })
            })
            .collect()
    }
}
