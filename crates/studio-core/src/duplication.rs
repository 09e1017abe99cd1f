//! Duplication of a files node within a graph document
//!
//! Copies every completed file entry of the target node into fresh blob
//! folders, appends the cloned node to the document, persists the document
//! at a new URL, and repoints the agent record. Originals are never deleted
//! or mutated. A failure anywhere aborts before the record update, so a
//! half-finished duplication leaves stray blobs behind but never a mutated
//! document pointer.

use crate::error::DuplicationError;
use crate::telemetry::{measure, BlobOperation, TelemetrySink};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use studio_graph::{AgentId, FileData, FileId, Node, NodeContent, NodeId, Position};
use studio_store::{
    fetch_graph, file_folder_path, path_join, pathname_to_filename, put_graph, AgentStore,
    BlobStore, CopyOptions,
};

const OPERATION: &str = "copy-files";

/// Outcome reported to the page, tagged by `result` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum DuplicationOutcome {
    /// All copies landed and the record points at the new document
    Success {
        /// Human-readable confirmation
        message: String,
    },
    /// The operation aborted; the record was not repointed
    Error {
        /// Human-readable failure description
        message: String,
    },
}

impl DuplicationOutcome {
    /// Whether the duplication landed
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The human-readable message, success or not
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } | Self::Error { message } => message,
        }
    }
}

/// Behavior knobs for the duplicated node
///
/// Defaults match what the canvas expects: a `Copy of` name and a slot
/// down-right of the original so the clone never covers it.
#[derive(Debug, Clone)]
pub struct DuplicatorConfig {
    /// Prefix prepended to the duplicated node's name
    pub name_prefix: String,
    /// Canvas offset applied to the duplicated node's position
    pub position_offset: Position,
}

impl DuplicatorConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different name prefix
    #[inline]
    #[must_use]
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// With a different position offset
    #[inline]
    #[must_use]
    pub fn with_position_offset(mut self, offset: Position) -> Self {
        self.position_offset = offset;
        self
    }
}

impl Default for DuplicatorConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Copy of ".to_string(),
            position_offset: Position::new(400.0, 100.0),
        }
    }
}

/// Duplicates the files node of an agent's graph document
///
/// Owns its collaborators; wrap them in `Arc` to share with the rest of the
/// application.
#[derive(Debug)]
pub struct FileDuplicator<A, B, T> {
    agents: A,
    blobs: B,
    telemetry: T,
    config: DuplicatorConfig,
}

impl<A, B, T> FileDuplicator<A, B, T>
where
    A: AgentStore,
    B: BlobStore,
    T: TelemetrySink,
{
    /// Create a duplicator with default configuration
    #[inline]
    #[must_use]
    pub fn new(agents: A, blobs: B, telemetry: T) -> Self {
        Self {
            agents,
            blobs,
            telemetry,
            config: DuplicatorConfig::default(),
        }
    }

    /// With a custom configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: DuplicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DuplicatorConfig {
        &self.config
    }

    /// Duplicate `target` within the agent's graph document.
    ///
    /// Never fails through the type system: every failure is folded into the
    /// tagged outcome the page renders. The operation is all-or-nothing from
    /// the caller's perspective: on error the agent record still points at
    /// the document it pointed at before.
    pub async fn duplicate(&self, agent_id: &AgentId, target: &Node) -> DuplicationOutcome {
        match self.run(agent_id, target).await {
            Ok(message) => DuplicationOutcome::Success { message },
            Err(err) => {
                tracing::warn!(agent_id = %agent_id, error = %err, "file duplication failed");
                DuplicationOutcome::Error {
                    message: err.page_message(),
                }
            }
        }
    }

    async fn run(&self, agent_id: &AgentId, target: &Node) -> Result<String, DuplicationError> {
        if agent_id.as_str().is_empty() {
            return Err(DuplicationError::MissingAgentId);
        }

        let record = self.agents.get(agent_id).await?;
        let graph_url = match record.and_then(|record| record.graph_url) {
            Some(url) => url,
            None => return Err(DuplicationError::AgentNotFound(agent_id.clone())),
        };

        if !target.content.is_files() {
            return Err(DuplicationError::InvalidTargetNode);
        }

        let started_at = Utc::now();
        tracing::info!(agent_id = %agent_id, target = %target.id, "duplicating files node");

        let graph = fetch_graph(&self.blobs, &graph_url).await?;

        let new_nodes: Vec<Node> = try_join_all(
            graph
                .nodes
                .iter()
                .map(|node| self.duplicate_node(node, target, started_at)),
        )
        .await?
        .into_iter()
        .flatten()
        .collect();

        let mut updated = graph;
        updated.nodes.extend(new_nodes);

        let persisted = put_graph(&self.blobs, &updated).await?;
        self.agents
            .update_graph_url(agent_id, &persisted.url, Some(&graph_url))
            .await?;

        self.telemetry.flush().await;
        tracing::info!(agent_id = %agent_id, url = %persisted.url, "files node duplicated");

        Ok("Success to copy files".to_string())
    }

    /// Clone `node` when it is the target files node; every other node
    /// contributes nothing to the appended sequence.
    async fn duplicate_node(
        &self,
        node: &Node,
        target: &Node,
        started_at: DateTime<Utc>,
    ) -> Result<Option<Node>, DuplicationError> {
        let files = match &node.content {
            NodeContent::Files(files) if node.id == target.id => files,
            _ => return Ok(None),
        };

        let new_data: Vec<FileData> = try_join_all(
            files
                .data
                .iter()
                .map(|entry| self.duplicate_file(entry, started_at)),
        )
        .await?
        .into_iter()
        .flatten()
        .collect();

        let mut content = files.clone();
        content.data = new_data;

        Ok(Some(Node {
            id: NodeId::generate(),
            name: format!("{}{}", self.config.name_prefix, node.name),
            content: NodeContent::Files(content),
            position: node
                .position
                .offset_by(self.config.position_offset.x, self.config.position_offset.y),
            extra: node.extra.clone(),
        }))
    }

    /// Copy every blob of a completed entry into a fresh folder and rebind
    /// the entry's URLs to the copies. Entries that never completed have no
    /// durable blobs and are dropped.
    async fn duplicate_file(
        &self,
        entry: &FileData,
        started_at: DateTime<Utc>,
    ) -> Result<Option<FileData>, DuplicationError> {
        if !entry.status.is_completed() {
            return Ok(None);
        }

        let new_id = FileId::generate();
        let source_folder = file_folder_path(&entry.id);
        let dest_folder = file_folder_path(&new_id);

        let blobs = measure(
            &self.telemetry,
            OPERATION,
            BlobOperation::List,
            started_at,
            || async {
                let blobs = self.blobs.list(&source_folder).await?;
                let size: u64 = blobs.iter().map(|blob| blob.size).sum();
                Ok((blobs, size))
            },
        )
        .await?;

        let copies: Vec<(String, String)> = try_join_all(blobs.iter().map(|blob| {
            let dest = path_join(&dest_folder, pathname_to_filename(&blob.pathname));
            async move {
                let copied = measure(
                    &self.telemetry,
                    OPERATION,
                    BlobOperation::Copy,
                    started_at,
                    || async {
                        let copied = self
                            .blobs
                            .copy(&blob.url, &dest, CopyOptions::public_with_suffix())
                            .await?;
                        Ok((copied, blob.size))
                    },
                )
                .await?;
                Ok::<_, DuplicationError>((blob.url.clone(), copied.url))
            }
        }))
        .await?;

        // At most one copied blob matches each original URL, so last-write
        // -wins accumulation is unambiguous.
        let mut file_blob_url = String::new();
        let mut text_data_url = String::new();
        for (source_url, copied_url) in copies {
            if source_url == entry.file_blob_url {
                file_blob_url.clone_from(&copied_url);
            }
            if source_url == entry.text_data_url {
                text_data_url = copied_url;
            }
        }

        let mut duplicated = entry.clone();
        duplicated.id = new_id;
        duplicated.file_blob_url = file_blob_url;
        duplicated.text_data_url = text_data_url;
        Ok(Some(duplicated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn outcome_serializes_tagged() {
        let outcome = DuplicationOutcome::Success {
            message: "Success to copy files".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["result"], "success");
        assert_eq!(json["message"], "Success to copy files");

        let error: DuplicationOutcome =
            serde_json::from_str(r#"{"result":"error","message":"nope"}"#).unwrap();
        assert!(!error.is_success());
        assert_eq!(error.message(), "nope");
    }

    #[test]
    fn config_defaults_match_canvas_expectations() {
        let config = DuplicatorConfig::new();
        assert_eq!(config.name_prefix, "Copy of ");
        assert_eq!(config.position_offset, Position::new(400.0, 100.0));
    }

    #[test]
    fn config_builders() {
        let config = DuplicatorConfig::new()
            .with_name_prefix("Clone: ")
            .with_position_offset(Position::new(0.0, 50.0));
        assert_eq!(config.name_prefix, "Clone: ");
        assert_eq!(config.position_offset.y, 50.0);
    }
}
