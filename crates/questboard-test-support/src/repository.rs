//! Test repositories: in-memory and failing store implementations.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use questboard_character::domain::aggregates::Character;
use questboard_character::domain::repository::{
    CharacterChanges, CharacterRepository, NewCharacter,
};
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, Page, QuestId};
use questboard_quest::domain::aggregates::{AssignedQuest, Assignment, Quest, QuestStatus};
use questboard_quest::domain::repository::{NewQuest, QuestChanges, QuestRepository};

fn page_bounds(page: Page) -> (usize, usize) {
    (
        usize::try_from(page.skip).unwrap_or(0),
        usize::try_from(page.limit).unwrap_or(0),
    )
}

fn injected_failure(operation: &str) -> DomainError {
    DomainError::Infrastructure(format!("injected failure in {operation}"))
}

#[derive(Debug, Default)]
struct CharacterTable {
    next_id: CharacterId,
    rows: BTreeMap<CharacterId, Character>,
}

/// A `CharacterRepository` backed by a map, with ids assigned from 1.
///
/// `fail_experience(true)` makes `add_experience` return an infrastructure
/// error, for exercising rollback paths.
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepository {
    table: Mutex<CharacterTable>,
    fail_experience: AtomicBool,
}

impl InMemoryCharacterRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles injected failures for `add_experience`.
    pub fn fail_experience(&self, fail: bool) {
        self.fail_experience.store(fail, Ordering::SeqCst);
    }

    /// Returns the stored character, bypassing the async interface.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn snapshot(&self, id: CharacterId) -> Option<Character> {
        self.table.lock().unwrap().rows.get(&id).cloned()
    }
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepository {
    async fn create_character(&self, new: &NewCharacter) -> Result<Character, DomainError> {
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let character = Character::new(table.next_id, new.name.clone(), new.class.clone());
        table.rows.insert(character.id, character.clone());
        Ok(character)
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, DomainError> {
        Ok(self.snapshot(id))
    }

    async fn list_characters(&self, page: Page) -> Result<Vec<Character>, DomainError> {
        let (skip, limit) = page_bounds(page);
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_character(
        &self,
        id: CharacterId,
        changes: &CharacterChanges,
    ) -> Result<Option<Character>, DomainError> {
        let mut table = self.table.lock().unwrap();
        Ok(table.rows.get_mut(&id).map(|character| {
            if let Some(name) = &changes.name {
                character.name.clone_from(name);
            }
            if let Some(class) = &changes.class {
                character.class.clone_from(class);
            }
            character.clone()
        }))
    }

    async fn delete_character(&self, id: CharacterId) -> Result<bool, DomainError> {
        Ok(self.table.lock().unwrap().rows.remove(&id).is_some())
    }

    async fn add_experience(
        &self,
        id: CharacterId,
        amount: i64,
    ) -> Result<Option<Character>, DomainError> {
        if self.fail_experience.load(Ordering::SeqCst) {
            return Err(injected_failure("add_experience"));
        }
        let mut table = self.table.lock().unwrap();
        Ok(table.rows.get_mut(&id).map(|character| {
            character.gain_experience(amount);
            character.clone()
        }))
    }
}

#[derive(Debug, Default)]
struct QuestTables {
    next_quest_id: QuestId,
    next_assignment_id: i64,
    quests: BTreeMap<QuestId, Quest>,
    assignments: Vec<Assignment>,
}

/// A `QuestRepository` backed by maps, with ids assigned from 1.
///
/// `fail_assignments(true)` makes `create_assignment` and
/// `delete_assignments_for_character` return an infrastructure error, for
/// exercising rollback paths.
#[derive(Debug, Default)]
pub struct InMemoryQuestRepository {
    tables: Mutex<QuestTables>,
    fail_assignments: AtomicBool,
}

impl InMemoryQuestRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles injected failures for assignment writes.
    pub fn fail_assignments(&self, fail: bool) {
        self.fail_assignments.store(fail, Ordering::SeqCst);
    }

    /// Returns the stored quest, bypassing the async interface.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn snapshot(&self, id: QuestId) -> Option<Quest> {
        self.tables.lock().unwrap().quests.get(&id).cloned()
    }

    /// Returns every stored assignment in creation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn assignments(&self) -> Vec<Assignment> {
        self.tables.lock().unwrap().assignments.clone()
    }
}

#[async_trait]
impl QuestRepository for InMemoryQuestRepository {
    async fn create_quest(&self, new: &NewQuest) -> Result<Quest, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_quest_id += 1;
        let quest = Quest {
            id: tables.next_quest_id,
            name: new.name.clone(),
            description: new.description.clone(),
            experience: new.experience,
            status: QuestStatus::Pending,
            created_at: new.created_at,
        };
        tables.quests.insert(quest.id, quest.clone());
        Ok(quest)
    }

    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, DomainError> {
        Ok(self.snapshot(id))
    }

    async fn list_quests(&self, page: Page) -> Result<Vec<Quest>, DomainError> {
        let (skip, limit) = page_bounds(page);
        Ok(self
            .tables
            .lock()
            .unwrap()
            .quests
            .values()
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
            .tables
            .lock()
            .unwrap()
            .quests
            .values()
            .filter(|quest| quest.status == status)
            .cloned()
            .collect())
    }

    async fn update_quest(
        &self,
        id: QuestId,
        changes: &QuestChanges,
    ) -> Result<Option<Quest>, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.quests.get_mut(&id).map(|quest| {
            if let Some(name) = &changes.name {
                quest.name.clone_from(name);
            }
            if let Some(description) = &changes.description {
                quest.description.clone_from(description);
            }
            if let Some(experience) = changes.experience {
                quest.experience = experience;
            }
            if let Some(status) = changes.status {
                quest.status = status;
            }
            quest.clone()
        }))
    }

    async fn update_quest_status(
        &self,
        id: QuestId,
        status: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.quests.get_mut(&id).map(|quest| {
            quest.status = status;
            quest.clone()
        }))
    }

    async fn transition_quest_status(
        &self,
        id: QuestId,
        from: QuestStatus,
        to: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .quests
            .get_mut(&id)
            .filter(|quest| quest.status == from)
            .map(|quest| {
                quest.status = to;
                quest.clone()
            }))
    }

    async fn delete_quest(&self, id: QuestId) -> Result<bool, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let removed = tables.quests.remove(&id).is_some();
        tables.assignments.retain(|a| a.quest_id != id);
        Ok(removed)
    }

    async fn create_assignment(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> Result<Assignment, DomainError> {
        if self.fail_assignments.load(Ordering::SeqCst) {
            return Err(injected_failure("create_assignment"));
        }
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables
            .assignments
            .iter()
            .find(|a| a.quest_id == quest_id && a.character_id == character_id)
        {
            return Ok(*existing);
        }
        tables.next_assignment_id += 1;
        let assignment = Assignment {
            id: tables.next_assignment_id,
            quest_id,
            character_id,
        };
        tables.assignments.push(assignment);
        Ok(assignment)
    }

    async fn delete_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<u64, DomainError> {
        if self.fail_assignments.load(Ordering::SeqCst) {
            return Err(injected_failure("delete_assignments_for_character"));
        }
        let mut tables = self.tables.lock().unwrap();
        let before = tables.assignments.len();
        tables.assignments.retain(|a| a.character_id != character_id);
        Ok(u64::try_from(before - tables.assignments.len()).unwrap_or(u64::MAX))
    }

    async fn list_assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AssignedQuest>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.character_id == character_id)
            .filter_map(|a| {
                tables.quests.get(&a.quest_id).map(|quest| AssignedQuest {
                    assignment_id: a.id,
                    character_id,
                    quest: quest.clone(),
                })
            })
            .collect())
    }
}

/// A character repository whose every call returns an infrastructure error.
#[derive(Debug)]
pub struct FailingCharacterRepository;

fn connection_refused<T>() -> Result<T, DomainError> {
    Err(DomainError::Infrastructure("connection refused".into()))
}

#[async_trait]
impl CharacterRepository for FailingCharacterRepository {
    async fn create_character(&self, _new: &NewCharacter) -> Result<Character, DomainError> {
        connection_refused()
    }

    async fn get_character(&self, _id: CharacterId) -> Result<Option<Character>, DomainError> {
        connection_refused()
    }

    async fn list_characters(&self, _page: Page) -> Result<Vec<Character>, DomainError> {
        connection_refused()
    }

    async fn update_character(
        &self,
        _id: CharacterId,
        _changes: &CharacterChanges,
    ) -> Result<Option<Character>, DomainError> {
        connection_refused()
    }

    async fn delete_character(&self, _id: CharacterId) -> Result<bool, DomainError> {
        connection_refused()
    }

    async fn add_experience(
        &self,
        _id: CharacterId,
        _amount: i64,
    ) -> Result<Option<Character>, DomainError> {
        connection_refused()
    }
}

/// A quest repository whose every call returns an infrastructure error.
#[derive(Debug)]
pub struct FailingQuestRepository;

#[async_trait]
impl QuestRepository for FailingQuestRepository {
    async fn create_quest(&self, _new: &NewQuest) -> Result<Quest, DomainError> {
        connection_refused()
    }

    async fn get_quest(&self, _id: QuestId) -> Result<Option<Quest>, DomainError> {
        connection_refused()
    }

    async fn list_quests(&self, _page: Page) -> Result<Vec<Quest>, DomainError> {
        connection_refused()
    }

    async fn list_quests_by_status(
        &self,
        _status: QuestStatus,
    ) -> Result<Vec<Quest>, DomainError> {
        connection_refused()
    }

    async fn update_quest(
        &self,
        _id: QuestId,
        _changes: &QuestChanges,
    ) -> Result<Option<Quest>, DomainError> {
        connection_refused()
    }

    async fn update_quest_status(
        &self,
        _id: QuestId,
        _status: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        connection_refused()
    }

    async fn transition_quest_status(
        &self,
        _id: QuestId,
        _from: QuestStatus,
        _to: QuestStatus,
    ) -> Result<Option<Quest>, DomainError> {
        connection_refused()
    }

    async fn delete_quest(&self, _id: QuestId) -> Result<bool, DomainError> {
        connection_refused()
    }

    async fn create_assignment(
        &self,
        _quest_id: QuestId,
        _character_id: CharacterId,
    ) -> Result<Assignment, DomainError> {
        connection_refused()
    }

    async fn delete_assignments_for_character(
        &self,
        _character_id: CharacterId,
    ) -> Result<u64, DomainError> {
        connection_refused()
    }

    async fn list_assignments_for_character(
        &self,
        _character_id: CharacterId,
    ) -> Result<Vec<AssignedQuest>, DomainError> {
        connection_refused()
    }
}
