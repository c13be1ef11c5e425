//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `detection` - Sightengine, Resemble AI, demo and fallback detectors
//! - `history` - Supabase and in-memory analysis history
//! - `http` - Axum routes, handlers and DTOs
//! - `storage` - Local filesystem upload storage

pub mod detection;
pub mod history;
pub mod http;
pub mod storage;
