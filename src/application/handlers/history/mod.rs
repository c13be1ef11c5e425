//! History handlers.

mod list_history;

pub use list_history::{
    ListHistoryHandler, ListHistoryQuery, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
