//! Storage Adapters
//!
//! Implementations of the UploadStorage port.
//!
//! ## Available Adapters
//!
//! - **LocalUploadStorage** - Flat directory of generated file names
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::LocalUploadStorage;
//!
//! let storage = LocalUploadStorage::new("./uploads");
//! let stored = storage.store(format, &bytes).await?;
//! ```

mod local_upload_storage;

pub use local_upload_storage::LocalUploadStorage;
