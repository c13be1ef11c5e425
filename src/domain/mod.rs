//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `analysis` - Media whitelist, score bucketing, result shapes, demo scores
//! - `history` - Persisted analysis history rows

pub mod analysis;
pub mod foundation;
pub mod history;
