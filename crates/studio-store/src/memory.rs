//! In-memory collaborators
//!
//! Back tests and local development. Blob URLs use the `https://blob.local`
//! origin with the pathname as the URL path, so url/pathname conversion is
//! lossless in both directions.

use crate::agents::{AgentRecord, AgentStore};
use crate::blob::{BlobAccess, BlobMeta, BlobStore, CopyOptions};
use crate::error::StoreError;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use studio_graph::AgentId;
use uuid::Uuid;

const ORIGIN: &str = "https://blob.local";

#[derive(Debug, Clone)]
struct StoredBlob {
    bytes: Vec<u8>,
    #[allow(dead_code)]
    access: BlobAccess,
}

/// In-memory [`BlobStore`]
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, StoredBlob>,
}

impl MemoryBlobStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a blob directly at the exact pathname, bypassing the async
    /// trait, which is handy when seeding fixtures
    pub fn seed(&self, pathname: &str, bytes: Vec<u8>) -> BlobMeta {
        let meta = BlobMeta {
            url: url_for(pathname),
            pathname: pathname.to_string(),
            size: bytes.len() as u64,
        };
        self.blobs.insert(
            pathname.to_string(),
            StoredBlob {
                bytes,
                access: BlobAccess::Public,
            },
        );
        meta
    }

    /// Number of stored blobs
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store holds no blobs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

fn url_for(pathname: &str) -> String {
    format!("{ORIGIN}/{pathname}")
}

fn pathname_for(url: &str) -> Option<&str> {
    url.strip_prefix(ORIGIN).and_then(|rest| rest.strip_prefix('/'))
}

/// Insert a random suffix between the filename stem and its extension, the
/// way the blob service avoids collisions on repeated writes.
fn with_random_suffix(path: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let suffix = &suffix[..12];
    let name_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path.rfind('.') {
        Some(dot) if dot > name_start => {
            format!("{}-{}{}", &path[..dot], suffix, &path[dot..])
        }
        _ => format!("{path}-{suffix}"),
    }
}

fn stored_path(path: &str, options: CopyOptions) -> String {
    if options.add_random_suffix {
        with_random_suffix(path)
    } else {
        path.to_string()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError> {
        let mut metas: Vec<BlobMeta> = self
            .blobs
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| BlobMeta {
                url: url_for(entry.key()),
                pathname: entry.key().clone(),
                size: entry.value().bytes.len() as u64,
            })
            .collect();
        metas.sort_by(|a, b| a.pathname.cmp(&b.pathname));
        Ok(metas)
    }

    async fn copy(
        &self,
        source_url: &str,
        dest_path: &str,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        let source = pathname_for(source_url)
            .and_then(|pathname| self.blobs.get(pathname))
            .ok_or_else(|| StoreError::BlobNotFound(source_url.to_string()))?;
        let bytes = source.bytes.clone();
        drop(source);

        let pathname = stored_path(dest_path, options);
        let meta = BlobMeta {
            url: url_for(&pathname),
            pathname: pathname.clone(),
            size: bytes.len() as u64,
        };
        self.blobs.insert(
            pathname,
            StoredBlob {
                bytes,
                access: options.access,
            },
        );
        Ok(meta)
    }

    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        let pathname = stored_path(path, options);
        let meta = BlobMeta {
            url: url_for(&pathname),
            pathname: pathname.clone(),
            size: bytes.len() as u64,
        };
        self.blobs.insert(
            pathname,
            StoredBlob {
                bytes,
                access: options.access,
            },
        );
        Ok(meta)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, StoreError> {
        pathname_for(url)
            .and_then(|pathname| self.blobs.get(pathname))
            .map(|blob| blob.bytes.clone())
            .ok_or_else(|| StoreError::BlobNotFound(url.to_string()))
    }
}

/// In-memory [`AgentStore`]
#[derive(Debug, Default)]
pub struct MemoryAgentStore {
    records: RwLock<HashMap<AgentId, AgentRecord>>,
}

impl MemoryAgentStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    pub fn insert(&self, record: AgentRecord) {
        self.records.write().insert(record.id.clone(), record);
    }
}

#[async_trait]
impl AgentStore for MemoryAgentStore {
    async fn get(&self, id: &AgentId) -> Result<Option<AgentRecord>, StoreError> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn update_graph_url(
        &self,
        id: &AgentId,
        url: &str,
        expected_current: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if record.graph_url.as_deref() != expected_current {
            return Err(StoreError::Conflict {
                expected: expected_current.map(str::to_string),
                actual: record.graph_url.clone(),
            });
        }
        record.graph_url = Some(url.to_string());
        Ok(())
    }
}
