//! Quest assignment service.

use std::sync::Arc;

use questboard_character::domain::repository::CharacterRepository;
use questboard_core::clock::Clock;
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, QuestId};
use questboard_quest::application::command_handlers::handle_create_quest;
use questboard_quest::domain::aggregates::{AssignedQuest, Assignment, Quest, QuestStatus};
use questboard_quest::domain::commands::CreateQuest;
use questboard_quest::domain::repository::QuestRepository;
use questboard_queue::{CharacterQuestQueues, GlobalPendingQueue};
use tracing::{debug, info, instrument, warn};

/// Coordinates quest status, assignments, experience and the quest queues.
///
/// Every mutation for one character runs while holding that character's
/// queue lock, so accepts and completions for the same character are applied
/// one at a time in lock-acquisition order. The global pending queue has its
/// own lock and is never taken while a character lock is held.
pub struct QuestAssignmentService {
    characters: Arc<dyn CharacterRepository>,
    quests: Arc<dyn QuestRepository>,
    queues: Arc<CharacterQuestQueues>,
    pending: Arc<GlobalPendingQueue>,
}

impl QuestAssignmentService {
    /// Creates a service over the given stores and queues.
    #[must_use]
    pub fn new(
        characters: Arc<dyn CharacterRepository>,
        quests: Arc<dyn QuestRepository>,
        queues: Arc<CharacterQuestQueues>,
        pending: Arc<GlobalPendingQueue>,
    ) -> Self {
        Self {
            characters,
            quests,
            queues,
            pending,
        }
    }

    /// The per-character queue registry.
    #[must_use]
    pub fn queues(&self) -> &CharacterQuestQueues {
        &self.queues
    }

    /// The global pending queue.
    #[must_use]
    pub fn pending(&self) -> &GlobalPendingQueue {
        &self.pending
    }

    /// Accepts `quest_id` on behalf of `character_id` and returns the quest
    /// in its `InProgress` state.
    ///
    /// Accepting a quest that this character already has in progress is a
    /// no-op that returns the quest again.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the character or quest does not
    /// exist, `DomainError::InvalidState` if the quest is not `Pending`
    /// (including when another character took it first) or sits in this
    /// character's queue without being `InProgress`, or any store error.
    /// On error the quest status, assignments and queue are unchanged.
    #[instrument(skip(self))]
    pub async fn accept_quest(
        &self,
        character_id: CharacterId,
        quest_id: QuestId,
    ) -> Result<Quest, DomainError> {
        self.require_character(character_id).await?;

        let queue = self.queues.queue(character_id);
        let mut queue = queue.lock().await;

        let quest = self
            .quests
            .get_quest(quest_id)
            .await?
            .ok_or_else(|| DomainError::quest_not_found(quest_id))?;

        match quest.status {
            QuestStatus::InProgress if queue.contains(quest_id) => {
                debug!("quest already accepted by this character");
                return Ok(quest);
            }
            status if queue.contains(quest_id) => {
                return Err(DomainError::InvalidState(format!(
                    "quest {quest_id} is already queued for character {character_id} but is {status}"
                )));
            }
            QuestStatus::Pending => {}
            status => {
                return Err(DomainError::InvalidState(format!(
                    "quest {quest_id} is {status}, only pendiente quests can be accepted"
                )));
            }
        }

        let accepted = self
            .quests
            .transition_quest_status(quest_id, QuestStatus::Pending, QuestStatus::InProgress)
            .await?
            .ok_or_else(|| {
                DomainError::InvalidState(format!("quest {quest_id} is no longer pendiente"))
            })?;

        let assignment = match self.quests.create_assignment(quest_id, character_id).await {
            Ok(assignment) => assignment,
            Err(err) => {
                self.revert_status(quest_id, QuestStatus::InProgress, QuestStatus::Pending)
                    .await;
                return Err(err);
            }
        };

        queue.enqueue(accepted.clone());

        info!(
            assignment_id = assignment.id,
            queued = queue.len(),
            "quest accepted"
        );

        Ok(accepted)
    }

    /// Completes the oldest quest in the character's queue, grants its
    /// experience, and returns it in its `Completed` state.
    ///
    /// Queue entries whose quest has been deleted or is no longer
    /// `InProgress` are dropped and the next entry is tried.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the character does not exist,
    /// `DomainError::InvalidState` if it has nothing in progress, or any
    /// store error. If granting experience fails the quest goes back to
    /// `InProgress` and stays at the head of the queue.
    #[instrument(skip(self))]
    pub async fn complete_next_quest(&self, character_id: CharacterId) -> Result<Quest, DomainError> {
        self.require_character(character_id).await?;

        let nothing_in_progress = || {
            DomainError::InvalidState(format!(
                "character {character_id} has no quests in progress"
            ))
        };
        let queue = self.queues.get(character_id).ok_or_else(nothing_in_progress)?;
        let mut queue = queue.lock().await;

        loop {
            let head = queue.peek().map(|quest| quest.id).ok_or_else(nothing_in_progress)?;

            let Some(completed) = self
                .quests
                .transition_quest_status(head, QuestStatus::InProgress, QuestStatus::Completed)
                .await?
            else {
                warn!(quest_id = head, "dropping stale queue entry");
                queue.dequeue();
                continue;
            };

            match self
                .characters
                .add_experience(character_id, completed.experience)
                .await
            {
                Ok(Some(character)) => {
                    queue.dequeue();
                    info!(
                        quest_id = completed.id,
                        experience = character.experience,
                        level = character.level,
                        "quest completed"
                    );
                    return Ok(completed);
                }
                Ok(None) => {
                    self.revert_status(head, QuestStatus::Completed, QuestStatus::InProgress)
                        .await;
                    return Err(DomainError::character_not_found(character_id));
                }
                Err(err) => {
                    self.revert_status(head, QuestStatus::Completed, QuestStatus::InProgress)
                        .await;
                    return Err(err);
                }
            }
        }
    }

    /// Returns the character's queue head-first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the character does not exist, or
    /// any store error.
    #[instrument(skip(self))]
    pub async fn list_character_quests(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<Quest>, DomainError> {
        self.require_character(character_id).await?;
        Ok(self.queues.list_all(character_id).await)
    }

    /// Lists the character's assignments, oldest first, with each quest as
    /// currently stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the character does not exist, or
    /// any store error.
    #[instrument(skip(self))]
    pub async fn list_character_assignments(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AssignedQuest>, DomainError> {
        self.require_character(character_id).await?;
        self.quests.list_assignments_for_character(character_id).await
    }

    /// Pops the global pending queue until it yields a quest that is still
    /// `Pending` in the store. The quest's status is not changed.
    ///
    /// # Errors
    ///
    /// Returns any store error; the entry being checked stays queued.
    #[instrument(skip(self))]
    pub async fn next_global_pending_quest(&self) -> Result<Option<Quest>, DomainError> {
        let mut pending = self.pending.lock().await;

        while let Some(candidate) = pending.peek().map(|quest| quest.id) {
            let current = self.quests.get_quest(candidate).await?;
            pending.dequeue();
            match current {
                Some(quest) if quest.status == QuestStatus::Pending => return Ok(Some(quest)),
                Some(quest) => debug!(quest_id = candidate, status = %quest.status, "skipping taken quest"),
                None => debug!(quest_id = candidate, "skipping deleted quest"),
            }
        }

        Ok(None)
    }

    /// Creates a quest and queues it on the global pending queue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for malformed fields, or any store
    /// error.
    #[instrument(skip(self, command, clock), fields(correlation_id = %command.correlation_id))]
    pub async fn create_quest(
        &self,
        command: &CreateQuest,
        clock: &dyn Clock,
    ) -> Result<Quest, DomainError> {
        let quest = handle_create_quest(command, clock, self.quests.as_ref()).await?;
        self.pending.enqueue(quest.clone()).await;
        Ok(quest)
    }

    /// Links a quest to a character without touching its status or any queue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if either side does not exist,
    /// `DomainError::InvalidState` if the quest is already completed, or any
    /// store error.
    #[instrument(skip(self))]
    pub async fn assign_quest(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> Result<Assignment, DomainError> {
        let quest = self
            .quests
            .get_quest(quest_id)
            .await?
            .ok_or_else(|| DomainError::quest_not_found(quest_id))?;
        self.require_character(character_id).await?;

        if quest.status.is_terminal() {
            return Err(DomainError::InvalidState(format!(
                "quest {quest_id} is already {}",
                quest.status
            )));
        }

        self.quests.create_assignment(quest_id, character_id).await
    }

    /// Deletes a character together with its assignments and queue.
    ///
    /// Quests that were in the queue keep their status. Returns `false` if
    /// the character did not exist.
    ///
    /// # Errors
    ///
    /// Returns any store error. Assignments are removed before the character,
    /// so a failure leaves the character and its queue in place.
    #[instrument(skip(self))]
    pub async fn delete_character(&self, character_id: CharacterId) -> Result<bool, DomainError> {
        let queue = self.queues.queue(character_id);
        let mut guard = queue.lock().await;

        if self.characters.get_character(character_id).await?.is_none() {
            drop(guard);
            self.queues.remove(character_id).await;
            return Ok(false);
        }
        let assignments = self
            .quests
            .delete_assignments_for_character(character_id)
            .await?;
        if !self.characters.delete_character(character_id).await? {
            drop(guard);
            self.queues.remove(character_id).await;
            return Ok(false);
        }

        let discarded = guard.len();
        guard.clear();
        drop(guard);
        self.queues.remove(character_id).await;

        info!(assignments, discarded, "character deleted");
        Ok(true)
    }

    /// Loads every `Pending` quest from the store onto the global queue.
    /// Returns how many were queued.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    #[instrument(skip(self))]
    pub async fn seed_pending_queue(&self) -> Result<usize, DomainError> {
        let quests = self.quests.list_quests_by_status(QuestStatus::Pending).await?;
        let loaded = self.pending.load_pending(quests).await;
        info!(loaded, "pending queue seeded");
        Ok(loaded)
    }

    async fn require_character(&self, character_id: CharacterId) -> Result<(), DomainError> {
        match self.characters.get_character(character_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::character_not_found(character_id)),
        }
    }

    async fn revert_status(&self, quest_id: QuestId, from: QuestStatus, to: QuestStatus) {
        match self.quests.transition_quest_status(quest_id, from, to).await {
            Ok(Some(_)) => debug!(quest_id, status = %to, "quest status reverted"),
            Ok(None) => warn!(quest_id, expected = %from, "quest changed before revert"),
            Err(err) => warn!(quest_id, error = %err, "failed to revert quest status"),
        }
    }
}
