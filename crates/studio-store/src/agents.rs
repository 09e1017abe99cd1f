//! Agent record collaborator

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_graph::AgentId;

/// A stored agent row: the pointer from an agent to its graph document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// Agent identifier
    pub id: AgentId,
    /// Display name
    pub name: String,
    /// URL of the persisted graph document, if one has been saved
    pub graph_url: Option<String>,
}

impl AgentRecord {
    /// New record without a persisted document
    #[must_use]
    pub fn new(id: AgentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            graph_url: None,
        }
    }

    /// With a graph document pointer
    #[must_use]
    pub fn with_graph_url(mut self, url: impl Into<String>) -> Self {
        self.graph_url = Some(url.into());
        self
    }
}

/// Agent record collaborator (the relational database in production)
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Look up a record by identifier
    async fn get(&self, id: &AgentId) -> Result<Option<AgentRecord>, StoreError>;

    /// Point a record at a newly persisted graph document.
    ///
    /// `expected_current` is the pointer value the caller read before
    /// mutating the document. When the stored pointer no longer matches, the
    /// update fails with [`StoreError::Conflict`] instead of clobbering
    /// whatever a concurrent writer persisted. Every persist lands at a
    /// fresh URL, so the pointer doubles as a version token.
    async fn update_graph_url(
        &self,
        id: &AgentId,
        url: &str,
        expected_current: Option<&str>,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: AgentStore + ?Sized> AgentStore for Arc<S> {
    async fn get(&self, id: &AgentId) -> Result<Option<AgentRecord>, StoreError> {
        (**self).get(id).await
    }

    async fn update_graph_url(
        &self,
        id: &AgentId,
        url: &str,
        expected_current: Option<&str>,
    ) -> Result<(), StoreError> {
        (**self).update_graph_url(id, url, expected_current).await
    }
}
