//! ListHistory - Query handler for a user's recent analyses.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::history::HistoryEntry;
use crate::ports::HistoryRepository;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Query for a user's history.
#[derive(Debug, Clone)]
pub struct ListHistoryQuery {
    pub user_id: UserId,
    /// Defaults to 20; must be within 1..=100.
    pub limit: Option<usize>,
}

/// Handler for listing history.
pub struct ListHistoryHandler {
    repository: Arc<dyn HistoryRepository>,
}

impl ListHistoryHandler {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListHistoryQuery) -> Result<Vec<HistoryEntry>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            return Err(ValidationError::invalid_format(
                "limit",
                format!("must be between 1 and {}", MAX_HISTORY_LIMIT),
            )
            .into());
        }

        self.repository.list_for_user(&query.user_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::history::InMemoryHistoryRepository;
    use crate::domain::analysis::{MediaKind, RiskLevel};
    use crate::domain::foundation::{AnalysisId, ErrorCode, Timestamp};

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    async fn seeded_repo(count: usize) -> InMemoryHistoryRepository {
        let repo = InMemoryHistoryRepository::new();
        for i in 0..count {
            repo.record(&HistoryEntry {
                id: AnalysisId::new(),
                user_id: user(),
                media_type: MediaKind::Video,
                file_name: format!("{}.mp4", i),
                confidence: 0.9,
                risk_level: RiskLevel::Critical,
                is_deepfake: true,
                demo_mode: false,
                result: serde_json::json!({}),
                created_at: Timestamp::now(),
            })
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn default_limit_is_twenty() {
        let handler = ListHistoryHandler::new(Arc::new(seeded_repo(25).await));

        let entries = handler
            .handle(ListHistoryQuery {
                user_id: user(),
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(entries.len(), DEFAULT_HISTORY_LIMIT);
    }

    #[tokio::test]
    async fn out_of_range_limit_is_rejected() {
        let handler = ListHistoryHandler::new(Arc::new(seeded_repo(1).await));

        for limit in [0, MAX_HISTORY_LIMIT + 1] {
            let err = handler
                .handle(ListHistoryQuery {
                    user_id: user(),
                    limit: Some(limit),
                })
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat);
        }
    }

    #[tokio::test]
    async fn explicit_limit_is_honored() {
        let handler = ListHistoryHandler::new(Arc::new(seeded_repo(5).await));

        let entries = handler
            .handle(ListHistoryQuery {
                user_id: user(),
                limit: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].file_name, "4.mp4");
    }
}
