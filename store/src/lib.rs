//! Blob store interface and implementations.
//!
//! Provides a trait-based single-blob store with an in-memory
//! implementation for testing and a file-backed implementation whose
//! writes are atomic. The store holds exactly one blob (the enrolled
//! voiceprint); re-enrollment replaces it wholesale.

pub mod file;
pub mod memory;

use std::fmt;
use thiserror::Error;

/// Errors that can occur in blob store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store: storage error: {0}")]
    Storage(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A store holding a single byte blob.
///
/// `save` must replace the blob atomically: a concurrent `load` observes
/// either the previous blob or the new one in full, never a partial write.
pub trait BlobStore: Send + Sync {
    /// Returns the stored blob, or `None` if nothing is stored.
    fn load(&self) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the stored blob.
    fn save(&self, bytes: &[u8]) -> StoreResult<()>;

    /// Removes the stored blob. Removing an absent blob is not an error.
    fn delete(&self) -> StoreResult<()>;

    /// Returns whether a blob is stored.
    fn exists(&self) -> StoreResult<bool>;
}

impl fmt::Debug for dyn BlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobStore {{ ... }}")
    }
}

// Re-export the implementations
pub use file::FileStore;
pub use memory::MemoryStore;
