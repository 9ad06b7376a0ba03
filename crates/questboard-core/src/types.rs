//! Identifier and paging types shared across contexts.

/// Database identifier of a character.
pub type CharacterId = i64;

/// Database identifier of a quest.
pub type QuestId = i64;

/// Offset/limit window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of rows to skip.
    pub skip: i64,
    /// Maximum number of rows to return.
    pub limit: i64,
}

impl Page {
    /// Largest page a caller may request.
    pub const MAX_LIMIT: i64 = 500;

    /// Builds a page from optional query parameters, clamping to sane bounds.
    #[must_use]
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        let defaults = Self::default();
        Self {
            skip: skip.unwrap_or(defaults.skip).max(0),
            limit: limit.unwrap_or(defaults.limit).clamp(0, Self::MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}
