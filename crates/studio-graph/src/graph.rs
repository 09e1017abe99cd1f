//! The graph document

use crate::id::NodeId;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A playground document: an ordered node sequence plus whatever else the
/// canvas stores alongside it
///
/// A document has no identity of its own; it is addressed by the storage URL
/// it was persisted under. Connectors, artifacts, and other document-level
/// fields pass through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Ordered node sequence
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Document-level fields this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Graph {
    /// Empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding the given nodes
    #[must_use]
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            extra: Map::new(),
        }
    }

    /// Find a node by identifier
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeContent, Position};
    use pretty_assertions::assert_eq;

    #[test]
    fn node_lookup_by_id() {
        let node = Node::new("Files", NodeContent::files(vec![]), Position::new(0.0, 0.0));
        let id = node.id.clone();
        let graph = Graph::with_nodes(vec![node]);

        assert!(graph.node(&id).is_some());
        assert!(graph.node(&NodeId::generate()).is_none());
    }

    #[test]
    fn document_fields_survive_round_trip() {
        let json = r#"{
            "nodes": [],
            "connectors": [{"from": "nd_a", "to": "nd_b"}],
            "version": "2024-07-01"
        }"#;

        let graph: Graph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.extra["version"], "2024-07-01");

        let back = serde_json::to_value(&graph).unwrap();
        assert_eq!(back["connectors"][0]["from"], "nd_a");
        assert_eq!(back["version"], "2024-07-01");
    }
}
