//! `PostgreSQL` implementation of the `CharacterRepository` trait.

use async_trait::async_trait;
use questboard_character::domain::aggregates::Character;
use questboard_character::domain::repository::{
    CharacterChanges, CharacterRepository, NewCharacter,
};
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page};
use sqlx::PgPool;
use tracing::debug;

use crate::error::infrastructure;

/// Column list for the `characters` table.
const COLUMNS: &str = "id, name, class, level, experience";

#[derive(Debug, sqlx::FromRow)]
struct CharacterRow {
    id: i64,
    name: String,
    class: String,
    level: i64,
    experience: i64,
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            class: row.class,
            level: row.level,
            experience: row.experience,
        }
    }
}

/// PostgreSQL-backed character repository.
#[derive(Debug, Clone)]
pub struct PgCharacterRepository {
    pool: PgPool,
}

impl PgCharacterRepository {
    /// Creates a new `PgCharacterRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CharacterRepository for PgCharacterRepository {
    async fn create_character(&self, new: &NewCharacter) -> Result<Character, DomainError> {
        let query = format!(
            "INSERT INTO characters (name, class, level, experience) \
             VALUES ($1, $2, $3, 0) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(&new.name)
            .bind(&new.class)
            .bind(Character::STARTING_LEVEL)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure("create_character"))?;
        Ok(row.into())
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        let row = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure("get_character"))?;
        Ok(row.map(Character::from))
    }

    async fn list_characters(&self, page: Page) -> Result<Vec<Character>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure("list_characters"))?;
        Ok(rows.into_iter().map(Character::from).collect())
    }

    async fn update_character(
        &self,
        id: CharacterId,
        changes: &CharacterChanges,
    ) -> Result<Option<Character>, DomainError> {
        let query = format!(
            "UPDATE characters \
             SET name = COALESCE($2, name), class = COALESCE($3, class) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.class.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure("update_character"))?;
        Ok(row.map(Character::from))
    }

    async fn delete_character(&self, id: CharacterId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure("delete_character"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_experience(
        &self,
        id: CharacterId,
        amount: i64,
    ) -> Result<Option<Character>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(infrastructure("add_experience"))?;

        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(infrastructure("add_experience"))?
        else {
            return Ok(None);
        };

        let mut character = Character::from(row);
        character.gain_experience(amount);

        sqlx::query("UPDATE characters SET level = $2, experience = $3 WHERE id = $1")
            .bind(id)
            .bind(character.level)
            .bind(character.experience)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure("add_experience"))?;

        tx.commit().await.map_err(infrastructure("add_experience"))?;

        debug!(
            character_id = id,
            experience = character.experience,
            level = character.level,
            "experience granted"
        );
        Ok(Some(character))
    }
}
