//! Graph document persistence
//!
//! Documents are immutable once written: every persist lands at a fresh
//! `graphs/<id>/graph.json` pathname and the agent record is repointed
//! afterwards. The previous URL therefore works as an optimistic-concurrency
//! token for [`crate::AgentStore::update_graph_url`].

use crate::blob::{BlobMeta, BlobStore, CopyOptions};
use crate::error::StoreError;
use crate::paths::{graph_folder_path, path_join};
use studio_graph::{Graph, GraphId};

/// Persist a graph document, returning the blob it landed in
pub async fn put_graph<B>(store: &B, graph: &Graph) -> Result<BlobMeta, StoreError>
where
    B: BlobStore + ?Sized,
{
    let bytes = serde_json::to_vec(graph)?;
    let path = path_join(&graph_folder_path(&GraphId::generate()), "graph.json");
    let meta = store
        .put(&path, bytes, CopyOptions::public_exact())
        .await?;
    tracing::debug!(url = %meta.url, size = meta.size, "graph document persisted");
    Ok(meta)
}

/// Fetch and deserialize a graph document by URL
pub async fn fetch_graph<B>(store: &B, url: &str) -> Result<Graph, StoreError>
where
    B: BlobStore + ?Sized,
{
    let bytes = store.get(url).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBlobStore;
    use pretty_assertions::assert_eq;
    use studio_graph::{Node, NodeContent, Position};

    #[tokio::test]
    async fn put_then_fetch_round_trips() {
        let store = MemoryBlobStore::new();
        let graph = Graph::with_nodes(vec![Node::new(
            "Files",
            NodeContent::files(vec![]),
            Position::new(4.0, 8.0),
        )]);

        let meta = put_graph(&store, &graph).await.unwrap();
        assert!(meta.pathname.starts_with("graphs/grph_"));
        assert!(meta.pathname.ends_with("/graph.json"));

        let fetched = fetch_graph(&store, &meta.url).await.unwrap();
        assert_eq!(fetched, graph);
    }

    #[tokio::test]
    async fn persists_land_at_fresh_urls() {
        let store = MemoryBlobStore::new();
        let graph = Graph::new();

        let first = put_graph(&store, &graph).await.unwrap();
        let second = put_graph(&store, &graph).await.unwrap();
        assert_ne!(first.url, second.url);
    }

    #[tokio::test]
    async fn fetch_of_missing_url_fails() {
        let store = MemoryBlobStore::new();
        let err = fetch_graph(&store, "https://blob.local/graphs/none/graph.json")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::BlobNotFound(_)));
    }
}
