//! Questboard: PostgreSQL persistence.
//!
//! Implements the character and quest store traits on top of a shared
//! `sqlx::PgPool`. Schema migrations live in the workspace `migrations/`
//! directory and are embedded into [`MIGRATOR`].

use sqlx::migrate::Migrator;

pub mod pg_character_repository;
pub mod pg_quest_repository;

mod error;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub use pg_character_repository::PgCharacterRepository;
pub use pg_quest_repository::PgQuestRepository;
