//! History Repository Port - Persistence of completed analyses.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::history::HistoryEntry;

/// Port for the analysis history table.
///
/// Row-level access control belongs to the backing store; this port only
/// filters by user.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist one completed analysis.
    async fn record(&self, entry: &HistoryEntry) -> Result<(), DomainError>;

    /// Most recent entries for a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, DomainError>;

    /// Short backend name reported by the status endpoint.
    fn backend_name(&self) -> &'static str;
}
