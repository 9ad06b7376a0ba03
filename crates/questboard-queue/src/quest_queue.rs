//! Unbounded FIFO of quest snapshots.

use std::collections::VecDeque;

use questboard_core::types::QuestId;
use questboard_quest::domain::aggregates::Quest;

/// An ordered, unbounded first-in-first-out sequence of quests.
///
/// No uniqueness is enforced here; callers decide whether a quest may be
/// queued twice.
#[derive(Debug, Clone, Default)]
pub struct QuestQueue {
    entries: VecDeque<Quest>,
}

impl QuestQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a quest to the tail.
    pub fn enqueue(&mut self, quest: Quest) {
        self.entries.push_back(quest);
    }

    /// Removes and returns the head, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<Quest> {
        self.entries.pop_front()
    }

    /// Returns the head without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Quest> {
        self.entries.front()
    }

    /// Returns a head-first copy of the contents.
    #[must_use]
    pub fn list_all(&self) -> Vec<Quest> {
        self.entries.iter().cloned().collect()
    }

    /// Whether a quest with `quest_id` is queued.
    #[must_use]
    pub fn contains(&self, quest_id: QuestId) -> bool {
        self.entries.iter().any(|quest| quest.id == quest_id)
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of queued quests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
