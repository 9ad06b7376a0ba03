//! Aggregate roots for the Character Management context.

use questboard_core::types::CharacterId;
use serde::{Deserialize, Serialize};

use super::leveling::level_for_experience;

/// The aggregate root for a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Class tag (warrior, mage, ...).
    pub class: String,
    /// Current level, always `>= 1`.
    pub level: i64,
    /// Cumulative experience, always `>= 0`.
    pub experience: i64,
}

impl Character {
    /// Level of a freshly created character.
    pub const STARTING_LEVEL: i64 = 1;

    /// Creates a character at level 1 with no experience.
    #[must_use]
    pub fn new(id: CharacterId, name: String, class: String) -> Self {
        Self {
            id,
            name,
            class,
            level: Self::STARTING_LEVEL,
            experience: 0,
        }
    }

    /// Adds `amount` experience and recomputes the level.
    ///
    /// The level is derived from the new total rather than bumped, and is
    /// never lowered below its current value.
    pub fn gain_experience(&mut self, amount: i64) {
        self.experience = self.experience.saturating_add(amount.max(0));
        self.level = self.level.max(level_for_experience(self.experience));
    }
}
