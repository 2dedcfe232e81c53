//! Blob storage for avatar and offer images

mod blob_store;
mod disk;

pub use blob_store::{BlobStore, PutOptions, StorageError};
pub use disk::DiskStore;
