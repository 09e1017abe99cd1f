//! Canvas nodes and their `type`-tagged content union

use crate::file::FileData;
use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 2-D canvas position
///
/// Coordinates are canvas pixels; negative values are legal (the canvas
/// origin sits wherever the user last panned it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position shifted by the given deltas
    #[inline]
    #[must_use]
    pub fn offset_by(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Content payload of a files node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilesContent {
    /// Ordered file entries
    pub data: Vec<FileData>,
    /// Fields stored on the content that this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilesContent {
    /// Content holding the given entries
    #[must_use]
    pub fn new(data: Vec<FileData>) -> Self {
        Self {
            data,
            extra: Map::new(),
        }
    }
}

/// Content payload of a plain text node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextContent {
    /// The text body
    pub text: String,
    /// Fields stored on the content that this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Node content union, tagged by `type` on the wire
///
/// The canvas stores more node types than this crate models. Anything with
/// an unrecognized tag lands in [`NodeContent::Other`] and is written back
/// verbatim when the document is re-persisted: operations must be able to
/// rewrite documents containing node types they do not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeContent {
    /// Uploaded files shown as a stack on the canvas
    Files(FilesContent),
    /// A plain text block
    Text(TextContent),
    /// Any other node type, preserved verbatim
    #[serde(untagged)]
    Other(Value),
}

impl NodeContent {
    /// Files content holding the given entries
    #[must_use]
    pub fn files(data: Vec<FileData>) -> Self {
        Self::Files(FilesContent::new(data))
    }

    /// The files payload, when this is a files node
    #[inline]
    #[must_use]
    pub fn as_files(&self) -> Option<&FilesContent> {
        match self {
            Self::Files(content) => Some(content),
            _ => None,
        }
    }

    /// Whether this is a files node
    #[inline]
    #[must_use]
    pub fn is_files(&self) -> bool {
        matches!(self, Self::Files(_))
    }
}

/// One node of a graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node identifier, unique within the document
    pub id: NodeId,
    /// Display name shown on the canvas
    pub name: String,
    /// Tagged content union
    pub content: NodeContent,
    /// Canvas position
    pub position: Position,
    /// Fields stored on nodes that this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// New node with a generated identifier at the given position
    #[must_use]
    pub fn new(name: impl Into<String>, content: NodeContent, position: Position) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
            content,
            position,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn offset_applies_to_negative_coordinates() {
        let moved = Position::new(-250.0, -30.5).offset_by(400.0, 100.0);
        assert_eq!(moved, Position::new(150.0, 69.5));
    }

    #[test]
    fn files_content_round_trips() {
        let node = Node::new(
            "Files",
            NodeContent::files(vec![FileData::pending("draft.md")]),
            Position::new(10.0, 20.0),
        );

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["content"]["type"], "files");
        assert_eq!(json["content"]["data"][0]["status"], "pending");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
        assert_eq!(
            back.content.as_files().unwrap().data[0].status,
            FileStatus::Pending
        );
    }

    #[test]
    fn unknown_content_type_is_preserved() {
        let json = r#"{
            "id": "nd_gen",
            "name": "Generator",
            "content": {
                "type": "textGeneration",
                "llm": "gpt-4o",
                "instruction": "Summarize the files"
            },
            "position": {"x": 0.0, "y": 0.0}
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert!(!node.content.is_files());
        assert!(matches!(node.content, NodeContent::Other(_)));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["content"]["type"], "textGeneration");
        assert_eq!(back["content"]["llm"], "gpt-4o");
    }

    #[test]
    fn unknown_node_fields_are_preserved() {
        let json = r#"{
            "id": "nd_t",
            "name": "Note",
            "content": {"type": "text", "text": "hello"},
            "position": {"x": 1.0, "y": 2.0},
            "selected": true
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.extra["selected"], true);

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["selected"], true);
        assert_eq!(back["content"]["text"], "hello");
    }
}
