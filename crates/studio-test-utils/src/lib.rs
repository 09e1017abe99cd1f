//! Testing utilities for the studio workspace
//!
//! Shared fixtures and fake collaborators.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use studio_core::{FileDuplicator, Measurement, TelemetrySink};
use studio_graph::{
    AgentId, FileData, FileStatus, Graph, Node, NodeContent, Position,
};
use studio_store::{
    file_folder_path, path_join, put_graph, AgentRecord, AgentStore, BlobMeta, BlobStore,
    CopyOptions, MemoryAgentStore, MemoryBlobStore, StoreError,
};

/// Seed a completed file entry: two blobs (content + extracted text) in the
/// entry's folder, with the entry's URLs pointing at them.
pub async fn seed_completed_file(blobs: &MemoryBlobStore, name: &str) -> FileData {
    let mut entry = FileData::pending(name);
    let folder = file_folder_path(&entry.id);

    let content = blobs.seed(
        &path_join(&folder, name),
        format!("content of {name}").into_bytes(),
    );
    let text = blobs.seed(
        &path_join(&folder, &format!("{name}.md")),
        format!("extracted text of {name}").into_bytes(),
    );

    entry.status = FileStatus::Completed;
    entry.file_blob_url = content.url;
    entry.text_data_url = text.url;
    entry
}

/// A file entry stuck in a non-completed status, with no durable blobs.
pub fn incomplete_file(name: &str, status: FileStatus) -> FileData {
    let mut entry = FileData::pending(name);
    entry.status = status;
    entry
}

/// A files node at a fixed canvas position.
pub fn files_node(data: Vec<FileData>) -> Node {
    Node::new("Files", NodeContent::files(data), Position::new(10.0, 20.0))
}

/// Persist a graph and insert an agent record pointing at it. Returns the
/// agent id and the persisted URL.
pub async fn seed_agent_with_graph(
    agents: &MemoryAgentStore,
    blobs: &MemoryBlobStore,
    graph: &Graph,
) -> (AgentId, String) {
    let meta = put_graph(blobs, graph).await.unwrap();
    let id = AgentId::generate();
    agents.insert(AgentRecord::new(id.clone(), "Test agent").with_graph_url(&meta.url));
    (id, meta.url)
}

/// Telemetry sink that buffers measurements and counts flushes.
#[derive(Debug, Default)]
pub struct CaptureSink {
    measurements: Mutex<Vec<Measurement>>,
    flushes: AtomicUsize,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        self.measurements.lock().clone()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetrySink for CaptureSink {
    fn record(&self, measurement: Measurement) {
        self.measurements.lock().push(measurement);
    }

    async fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Blob store whose every operation fails, for abort-path tests.
#[derive(Debug, Default)]
pub struct FailingBlobStore {
    pub message: String,
}

impl FailingBlobStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }
}

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn list(&self, _prefix: &str) -> Result<Vec<BlobMeta>, StoreError> {
        self.fail()
    }

    async fn copy(
        &self,
        _source_url: &str,
        _dest_path: &str,
        _options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        self.fail()
    }

    async fn put(
        &self,
        _path: &str,
        _bytes: Vec<u8>,
        _options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        self.fail()
    }

    async fn get(&self, _url: &str) -> Result<Vec<u8>, StoreError> {
        self.fail()
    }
}

/// Blob store that works until the final document write: copies succeed,
/// `put` fails. Exercises the no-partial-persist guarantee.
#[derive(Debug, Default)]
pub struct PutFailingBlobStore {
    pub inner: MemoryBlobStore,
}

impl PutFailingBlobStore {
    pub fn new(inner: MemoryBlobStore) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl BlobStore for PutFailingBlobStore {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError> {
        self.inner.list(prefix).await
    }

    async fn copy(
        &self,
        source_url: &str,
        dest_path: &str,
        options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        self.inner.copy(source_url, dest_path, options).await
    }

    async fn put(
        &self,
        _path: &str,
        _bytes: Vec<u8>,
        _options: CopyOptions,
    ) -> Result<BlobMeta, StoreError> {
        Err(StoreError::Backend("document write rejected".to_string()))
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, StoreError> {
        self.inner.get(url).await
    }
}

/// Agent store wrapper that counts collaborator calls.
#[derive(Debug, Default)]
pub struct CountingAgentStore {
    pub inner: MemoryAgentStore,
    gets: AtomicUsize,
    updates: AtomicUsize,
}

impl CountingAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentStore for CountingAgentStore {
    async fn get(&self, id: &AgentId) -> Result<Option<AgentRecord>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }

    async fn update_graph_url(
        &self,
        id: &AgentId,
        url: &str,
        expected_current: Option<&str>,
    ) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_graph_url(id, url, expected_current).await
    }
}

/// A fully wired duplicator over in-memory collaborators, with handles kept
/// for seeding and assertions.
pub struct DuplicationHarness {
    pub agents: Arc<MemoryAgentStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub telemetry: Arc<CaptureSink>,
    pub duplicator:
        FileDuplicator<Arc<MemoryAgentStore>, Arc<MemoryBlobStore>, Arc<CaptureSink>>,
}

pub fn duplication_harness() -> DuplicationHarness {
    let agents = Arc::new(MemoryAgentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let telemetry = Arc::new(CaptureSink::new());
    let duplicator = FileDuplicator::new(agents.clone(), blobs.clone(), telemetry.clone());
    DuplicationHarness {
        agents,
        blobs,
        telemetry,
        duplicator,
    }
}
