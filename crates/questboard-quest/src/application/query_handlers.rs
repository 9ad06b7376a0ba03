//! Query handlers for the Quest Catalog context.

use questboard_core::error::DomainError;
use questboard_core::types::{Page, QuestId};

use crate::domain::aggregates::{Quest, QuestStatus};
use crate::domain::repository::QuestRepository;

/// Retrieves a quest by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist, or any store
/// error.
pub async fn get_quest_by_id(
    quest_id: QuestId,
    repo: &dyn QuestRepository,
) -> Result<Quest, DomainError> {
    repo.get_quest(quest_id)
        .await?
        .ok_or_else(|| DomainError::quest_not_found(quest_id))
}

/// Lists quests in id order.
///
/// # Errors
///
/// Returns any store error.
pub async fn list_quests(page: Page, repo: &dyn QuestRepository) -> Result<Vec<Quest>, DomainError> {
    repo.list_quests(page).await
}

/// Lists every quest currently in `status`.
///
/// # Errors
///
/// Returns any store error.
pub async fn list_quests_by_status(
    status: QuestStatus,
    repo: &dyn QuestRepository,
) -> Result<Vec<Quest>, DomainError> {
    repo.list_quests_by_status(status).await
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use questboard_core::error::DomainError;
    use questboard_core::types::Page;

    use crate::application::query_handlers::{get_quest_by_id, list_quests, list_quests_by_status};
    use crate::application::stub::StubQuestRepository;
    use crate::domain::aggregates::{Quest, QuestStatus};

    fn board() -> StubQuestRepository {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let quest = |id, name: &str, status| Quest {
            id,
            name: name.to_owned(),
            description: "A quest worth taking on".to_owned(),
            experience: 100,
            status,
            created_at,
        };
        StubQuestRepository::with(vec![
            quest(1, "Slay Dragon", QuestStatus::Pending),
            quest(2, "Rescue Prince", QuestStatus::InProgress),
            quest(3, "Recover Ring", QuestStatus::Pending),
        ])
    }

    #[tokio::test]
    async fn test_get_quest_by_id_returns_quest() {
        let repo = board();

        let quest = get_quest_by_id(2, &repo).await.unwrap();

        assert_eq!(quest.name, "Rescue Prince");
    }

    #[tokio::test]
    async fn test_get_quest_by_id_returns_not_found() {
        let repo = board();

        let result = get_quest_by_id(99, &repo).await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "quest");
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_quests_honours_page() {
        let repo = board();

        let quests = list_quests(Page { skip: 2, limit: 10 }, &repo).await.unwrap();

        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].id, 3);
    }

    #[tokio::test]
    async fn test_list_quests_by_status_filters() {
        let repo = board();

        let pending = list_quests_by_status(QuestStatus::Pending, &repo)
            .await
            .unwrap();

        let ids: Vec<i64> = pending.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
