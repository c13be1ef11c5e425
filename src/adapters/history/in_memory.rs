//! In-Memory History Repository
//!
//! Keeps analysis history in process memory. Used when Supabase is not
//! configured, and in tests. Bounded per user and in total; the oldest
//! entries are evicted first.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::history::HistoryEntry;
use crate::ports::HistoryRepository;

/// Entries kept per user; matches the largest page the history query serves.
pub const DEFAULT_PER_USER_LIMIT: usize = 100;

/// Entries kept across all users.
pub const DEFAULT_TOTAL_LIMIT: usize = 10_000;

/// In-memory analysis history, newest entry first.
#[derive(Debug, Clone)]
pub struct InMemoryHistoryRepository {
    entries: Arc<RwLock<VecDeque<HistoryEntry>>>,
    per_user_limit: usize,
    total_limit: usize,
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::with_limits(DEFAULT_PER_USER_LIMIT, DEFAULT_TOTAL_LIMIT)
    }
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits below one are raised to one.
    pub fn with_limits(per_user_limit: usize, total_limit: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            per_user_limit: per_user_limit.max(1),
            total_limit: total_limit.max(1),
        }
    }

    /// Number of stored entries (useful for tests)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn record(&self, entry: &HistoryEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.push_front(entry.clone());

        let user_count = entries
            .iter()
            .filter(|e| e.user_id == entry.user_id)
            .count();
        if user_count > self.per_user_limit {
            if let Some(oldest) = entries.iter().rposition(|e| e.user_id == entry.user_id) {
                entries.remove(oldest);
            }
        }
        entries.truncate(self.total_limit);
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| &entry.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
