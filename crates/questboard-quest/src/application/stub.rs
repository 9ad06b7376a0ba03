//! Vec-backed `QuestRepository` shared by this crate's handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page, QuestId};

use crate::domain::aggregates::{AssignedQuest, Assignment, Quest, QuestStatus};
use crate::domain::repository::{NewQuest, QuestChanges, QuestRepository};

#[derive(Debug, Default)]
pub(crate) struct StubQuestRepository {
    pub(crate) quests: Mutex<Vec<Quest>>,
    pub(crate) assignments: Mutex<Vec<Assignment>>,
}

impl StubQuestRepository {
    pub(crate) fn with(quests: Vec<Quest>) -> Self {
        Self {
            quests: Mutex::new(quests),
            assignments: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn quest(&self, id: QuestId) -> Option<Quest> {
        self.quests.lock().unwrap().iter().find(|q| q.id == id).cloned()
    }
}

#[async_trait]
impl QuestRepository for StubQuestRepository {
    async fn create_quest(&self, new: &NewQuest) -> Result<Quest, DomainError> {
        let mut quests = self.quests.lock().unwrap();
        let quest = Quest {
            id: i64::try_from(quests.len()).unwrap() + 1,
            name: new.name.clone(),
            description: new.description.clone(),
            experience: new.experience,
            status: QuestStatus::Pending,
            created_at: new.created_at,
        };
        quests.push(quest.clone());
        Ok(quest)
    }

    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, DomainError> {
        Ok(self.quest(id))
    }

    async fn list_quests(&self, page: Page) -> Result<Vec<Quest>, DomainError> {
        let skip = usize::try_from(page.skip).unwrap();
        let limit = usize::try_from(page.limit).unwrap();
        Ok(self
            .quests
            .lock()
            .unwrap()
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_quests_by_status(
        &self,
        status: QuestStatus,
    ) -> Result<Vec<Quest>, DomainError> {
        Ok(self
            .quests
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.status == status)
            .cloned()
            .collect())
    }

    async fn update_quest(
        &self,
        id: QuestId,
        changes: &QuestChanges,
    ) -> Result<Option<Quest>, DomainError> {
        let mut quests = self.quests.lock().unwrap();
        Ok(quests.iter_mut().find(|q| q.id == id).map(|q| {
            if let Some(name) = &changes.name {
                q.name.clone_from(name);
            }
            if let Some(description) = &changes.description {
                q.description.clone_from(description);
            }
            if let Some(experience) = changes.experience {
                q.experience = experience;
            }
            if let Some(status) = changes.status {
                q.status = status;
            }
            q.clone()
        }))
    }

    async fn update_quest_status(
        &self,
        id: QuestId,
        status: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        let mut quests = self.quests.lock().unwrap();
        Ok(quests.iter_mut().find(|q| q.id == id).map(|q| {
            q.status = status;
            q.clone()
        }))
    }

    async fn transition_quest_status(
        &self,
        id: QuestId,
        from: QuestStatus,
        to: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        let mut quests = self.quests.lock().unwrap();
        Ok(quests
            .iter_mut()
            .find(|q| q.id == id && q.status == from)
            .map(|q| {
                q.status = to;
                q.clone()
            }))
    }

    async fn delete_quest(&self, id: QuestId) -> Result<bool, DomainError> {
        let mut quests = self.quests.lock().unwrap();
        let before = quests.len();
        quests.retain(|q| q.id != id);
        self.assignments
            .lock()
            .unwrap()
            .retain(|a| a.quest_id != id);
        Ok(quests.len() != before)
    }

    async fn create_assignment(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> Result<Assignment, DomainError> {
        let mut assignments = self.assignments.lock().unwrap();
        if let Some(existing) = assignments
            .iter()
            .find(|a| a.quest_id == quest_id && a.character_id == character_id)
        {
            return Ok(*existing);
        }
        let assignment = Assignment {
            id: i64::try_from(assignments.len()).unwrap() + 1,
            quest_id,
            character_id,
        };
        assignments.push(assignment);
        Ok(assignment)
    }

    async fn delete_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<u64, DomainError> {
        let mut assignments = self.assignments.lock().unwrap();
        let before = assignments.len();
        assignments.retain(|a| a.character_id != character_id);
        Ok(u64::try_from(before - assignments.len()).unwrap())
    }

    async fn list_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AssignedQuest>, DomainError> {
        let assignments = self.assignments.lock().unwrap().clone();
        Ok(assignments
            .into_iter()
            .filter(|a| a.character_id == character_id)
            .filter_map(|a| {
                self.quest(a.quest_id).map(|quest| AssignedQuest {
                    assignment_id: a.id,
                    character_id,
                    quest,
                })
            })
            .collect())
    }
}
