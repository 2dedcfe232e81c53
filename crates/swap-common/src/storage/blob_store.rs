//! Blob storage port
//!
//! Objects are addressed by forward-slash paths like
//! `avatars/{user_id}/avatar-{millis}.jpg`; the store hands out stable
//! public URLs for them. Image bytes never touch the database.

use async_trait::async_trait;

/// Options for a single upload
#[derive(Debug, Clone, Copy)]
pub struct PutOptions<'a> {
    /// Replace an existing object at the same path
    pub overwrite: bool,
    /// MIME type of the payload; advisory for stores that track it
    pub content_type: &'a str,
}

impl<'a> PutOptions<'a> {
    /// Overwriting upload with the given content type
    #[must_use]
    pub fn overwriting(content_type: &'a str) -> Self {
        Self {
            overwrite: true,
            content_type,
        }
    }
}

/// Blob storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage port for binary objects (images)
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object at the given path
    async fn put(&self, path: &str, bytes: &[u8], options: PutOptions<'_>)
        -> Result<(), StorageError>;

    /// Remove an object. Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Public URL under which the object is served
    fn public_url(&self, path: &str) -> String;
}
