//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DeepfakeDetector` - Detection vendors (Sightengine, Resemble) and demo data
//! - `UploadStorage` - Stored uploads, served back and cleaned up
//! - `HistoryRepository` - Analysis history persistence (Supabase)

mod deepfake_detector;
mod history_repository;
mod upload_storage;

pub use deepfake_detector::{DeepfakeDetector, DetectionError, DetectorInfo, MediaUpload};
pub use history_repository::HistoryRepository;
pub use upload_storage::{CleanupReport, StorageError, StoredFile, StoredUpload, UploadStorage};
