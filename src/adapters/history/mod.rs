//! History Adapters
//!
//! Implementations of the HistoryRepository port.
//!
//! - **SupabaseHistoryRepository** - PostgREST table access
//! - **InMemoryHistoryRepository** - Process memory (no Supabase configured, tests)

mod in_memory;
mod supabase;

pub use in_memory::{InMemoryHistoryRepository, DEFAULT_PER_USER_LIMIT, DEFAULT_TOTAL_LIMIT};
pub use supabase::{SupabaseConfig, SupabaseHistoryRepository};
