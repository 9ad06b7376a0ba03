//! Registry of per-character quest queues.

use std::sync::Arc;

use dashmap::DashMap;
use questboard_core::types::CharacterId;
use questboard_quest::domain::aggregates::Quest;
use tokio::sync::Mutex;
use tracing::debug;

use crate::quest_queue::QuestQueue;

/// A character's queue behind its own lock.
pub type SharedQuestQueue = Arc<Mutex<QuestQueue>>;

/// One FIFO quest queue per character, created on first write.
///
/// Each queue has its own async mutex so callers can hold it across store
/// calls; characters never contend with each other. Reads of a character
/// that has never been written to behave as an empty queue without creating
/// one.
#[derive(Debug, Default)]
pub struct CharacterQuestQueues {
    queues: DashMap<CharacterId, SharedQuestQueue>,
}

impl CharacterQuestQueues {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the character's queue, creating it if needed.
    ///
    /// Creation happens under the map's shard lock, so concurrent first
    /// accesses agree on a single queue.
    pub fn queue(&self, character_id: CharacterId) -> SharedQuestQueue {
        self.queues
            .entry(character_id)
            .or_insert_with(|| {
                debug!(character_id, "creating quest queue");
                Arc::new(Mutex::new(QuestQueue::new()))
            })
            .value()
            .clone()
    }

    /// Returns the character's queue if one has been created.
    pub fn get(&self, character_id: CharacterId) -> Option<SharedQuestQueue> {
        self.queues
            .get(&character_id)
            .map(|entry| entry.value().clone())
    }

    /// Appends `quest` to the character's queue.
    pub async fn enqueue(&self, character_id: CharacterId, quest: Quest) {
        self.queue(character_id).lock().await.enqueue(quest);
    }

    /// Removes and returns the head of the character's queue.
    pub async fn dequeue(&self, character_id: CharacterId) -> Option<Quest> {
        match self.get(character_id) {
            Some(queue) => queue.lock().await.dequeue(),
            None => None,
        }
    }

    /// Returns a copy of the head of the character's queue.
    pub async fn peek(&self, character_id: CharacterId) -> Option<Quest> {
        match self.get(character_id) {
            Some(queue) => queue.lock().await.peek().cloned(),
            None => None,
        }
    }

    /// Returns the character's queue head-first.
    pub async fn list_all(&self, character_id: CharacterId) -> Vec<Quest> {
        match self.get(character_id) {
            Some(queue) => queue.lock().await.list_all(),
            None => Vec::new(),
        }
    }

    /// Whether the character's queue is empty.
    pub async fn is_empty(&self, character_id: CharacterId) -> bool {
        self.size(character_id).await == 0
    }

    /// Number of quests in the character's queue.
    pub async fn size(&self, character_id: CharacterId) -> usize {
        match self.get(character_id) {
            Some(queue) => queue.lock().await.len(),
            None => 0,
        }
    }

    /// Empties the character's queue.
    pub async fn clear(&self, character_id: CharacterId) {
        if let Some(queue) = self.get(character_id) {
            queue.lock().await.clear();
        }
    }

    /// Drops the character's queue from the registry.
    ///
    /// Anyone still holding the handle sees an emptied queue.
    pub async fn remove(&self, character_id: CharacterId) {
        if let Some((_, queue)) = self.queues.remove(&character_id) {
            queue.lock().await.clear();
        }
    }
}
