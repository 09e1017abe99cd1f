//! Storage collaborators for playground documents
//!
//! The deployed application keeps agent records in a relational database and
//! keeps documents and file content in a blob service. This crate owns the
//! seams between the operations layer and those services:
//! - [`AgentStore`]: the agent record and its graph-document pointer
//! - [`BlobStore`]: list/copy/put/get against the blob namespace
//! - blob path conventions and graph document persistence
//! - in-memory implementations backing tests and local development
//!
//! Real database and blob-service adapters live with the embedding
//! application; everything here is expressed against the traits.

pub mod agents;
pub mod blob;
pub mod documents;
pub mod error;
pub mod memory;
pub mod paths;

// Re-exports for convenience
pub use agents::{AgentRecord, AgentStore};
pub use blob::{BlobAccess, BlobMeta, BlobStore, CopyOptions};
pub use documents::{fetch_graph, put_graph};
pub use error::StoreError;
pub use memory::{MemoryAgentStore, MemoryBlobStore};
pub use paths::{file_folder_path, path_join, pathname_to_filename};
