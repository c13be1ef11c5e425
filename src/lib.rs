//! Deepfake Shield - Media authenticity analysis service
//!
//! Accepts image, video and audio uploads, scores them for manipulation with
//! external detection vendors (or randomized demo scores when no vendor is
//! available), and keeps a per-user history of results.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
