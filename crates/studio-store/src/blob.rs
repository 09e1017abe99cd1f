//! Blob storage collaborator

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Access level applied to stored blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobAccess {
    /// Readable by anyone holding the URL
    Public,
    /// Readable only through the service's signed access
    Private,
}

/// Options for blob writes and copies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Append a random suffix to the stored filename so concurrent writes
    /// to the same path cannot collide
    pub add_random_suffix: bool,
    /// Access level of the stored blob
    pub access: BlobAccess,
}

impl CopyOptions {
    /// Publicly readable, collision-safe filename (the canvas default for
    /// file content)
    #[inline]
    #[must_use]
    pub const fn public_with_suffix() -> Self {
        Self {
            add_random_suffix: true,
            access: BlobAccess::Public,
        }
    }

    /// Publicly readable at the exact path given
    #[inline]
    #[must_use]
    pub const fn public_exact() -> Self {
        Self {
            add_random_suffix: false,
            access: BlobAccess::Public,
        }
    }
}

/// Metadata of a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMeta {
    /// Externally addressable URL
    pub url: String,
    /// Pathname within the storage namespace
    pub pathname: String,
    /// Size in bytes
    pub size: u64,
}

/// Object storage collaborator
///
/// Mirrors the deployed blob service: a flat namespace of pathnames, each
/// blob addressable by a URL the service hands back on write. Copies are
/// server-side; bytes only cross the wire for `put` and `get`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List every blob whose pathname starts with `prefix`
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError>;

    /// Copy an existing blob to a new pathname, returning the new blob
    async fn copy(
        &self,
        source_url: &str,
        dest_path: &str,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError>;

    /// Store raw bytes at a pathname
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError>;

    /// Fetch blob bytes by URL
    async fn get(&self, url: &str) -> Result<Vec<u8>, StoreError>;
}

#[async_trait]
impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError> {
        (**self).list(prefix).await
    }

    async fn copy(
        &self,
        source_url: &str,
        dest_path: &str,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        (**self).copy(source_url, dest_path, options).await
    }

    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        (**self).put(path, bytes, options).await
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, StoreError> {
        (**self).get(url).await
    }
}
