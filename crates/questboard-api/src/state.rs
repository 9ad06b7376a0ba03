//! Shared application state.

use std::sync::Arc;

use questboard_assignment::QuestAssignmentService;
use questboard_character::domain::repository::CharacterRepository;
use questboard_core::clock::Clock;
use questboard_quest::domain::repository::QuestRepository;
use questboard_queue::{CharacterQuestQueues, GlobalPendingQueue};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp new quests.
    pub clock: Arc<dyn Clock>,
    /// Character store.
    pub characters: Arc<dyn CharacterRepository>,
    /// Quest and assignment store.
    pub quests: Arc<dyn QuestRepository>,
    /// Queue-aware operations spanning characters and quests.
    pub assignments: Arc<QuestAssignmentService>,
}

impl AppState {
    /// Create new application state with fresh, empty queues.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        characters: Arc<dyn CharacterRepository>,
        quests: Arc<dyn QuestRepository>,
    ) -> Self {
        let assignments = Arc::new(QuestAssignmentService::new(
            Arc::clone(&characters),
            Arc::clone(&quests),
            Arc::new(CharacterQuestQueues::new()),
            Arc::new(GlobalPendingQueue::new()),
        ));
        Self {
            clock,
            characters,
            quests,
            assignments,
        }
    }
}
