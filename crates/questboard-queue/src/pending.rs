//! Global queue of quests waiting for a taker.

use questboard_quest::domain::aggregates::{Quest, QuestStatus};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::quest_queue::QuestQueue;

/// Single FIFO of `Pending` quests, filled as quests are created.
///
/// Popping a quest does not change its status; that is up to whoever
/// consumes it.
#[derive(Debug, Default)]
pub struct GlobalPendingQueue {
    queue: Mutex<QuestQueue>,
}

impl GlobalPendingQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the queue for a multi-step operation.
    pub async fn lock(&self) -> MutexGuard<'_, QuestQueue> {
        self.queue.lock().await
    }

    /// Appends `quest` if it is `Pending`. Returns whether it was queued.
    pub async fn enqueue(&self, quest: Quest) -> bool {
        if quest.status != QuestStatus::Pending {
            debug!(quest_id = quest.id, status = %quest.status, "not queuing non-pending quest");
            return false;
        }
        self.queue.lock().await.enqueue(quest);
        true
    }

    /// Appends every `Pending` quest in order. Returns how many were queued.
    pub async fn load_pending(&self, quests: impl IntoIterator<Item = Quest>) -> usize {
        let mut queue = self.queue.lock().await;
        let mut loaded = 0;
        for quest in quests {
            if quest.status == QuestStatus::Pending {
                queue.enqueue(quest);
                loaded += 1;
            }
        }
        loaded
    }

    /// Removes and returns the head.
    pub async fn dequeue(&self) -> Option<Quest> {
        self.queue.lock().await.dequeue()
    }

    /// Returns a copy of the head.
    pub async fn peek(&self) -> Option<Quest> {
        self.queue.lock().await.peek().cloned()
    }

    /// Returns the contents head-first.
    pub async fn list_all(&self) -> Vec<Quest> {
        self.queue.lock().await.list_all()
    }

    /// Whether the queue is empty.
    pub async fn is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }

    /// Number of queued quests.
    pub async fn size(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Removes every entry.
    pub async fn clear(&self) {
        self.queue.lock().await.clear();
    }
}
