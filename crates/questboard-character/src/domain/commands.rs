//! Commands for the Character Management context.

use questboard_core::types::CharacterId;
use uuid::Uuid;

/// Command to create a new character.
#[derive(Debug, Clone)]
pub struct CreateCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character's name.
    pub name: String,
    /// The character's class.
    pub class: String,
}

/// Command to rename a character or change its class.
#[derive(Debug, Clone)]
pub struct UpdateCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: CharacterId,
    /// New name, if changing.
    pub name: Option<String>,
    /// New class, if changing.
    pub class: Option<String>,
}

/// Command to award experience to a character.
#[derive(Debug, Clone)]
pub struct AwardExperience {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: CharacterId,
    /// The amount of experience to award.
    pub amount: i64,
}
