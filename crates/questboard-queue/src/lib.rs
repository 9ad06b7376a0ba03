//! Questboard: in-memory FIFO quest queues.
//!
//! Holds one queue per character plus a single queue of quests still waiting
//! for a taker. Queue contents live only for the lifetime of the process;
//! persisted quest status is kept in sync by the assignment service.

mod character_queues;
mod pending;
mod quest_queue;

pub use character_queues::{CharacterQuestQueues, SharedQuestQueue};
pub use pending::GlobalPendingQueue;
pub use quest_queue::QuestQueue;
