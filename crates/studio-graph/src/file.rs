//! File entries attached to files nodes

use crate::id::FileId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upload lifecycle status of a file entry
///
/// Only `completed` entries have blobs worth copying; every other status
/// means the upload pipeline has not produced durable content yet (or gave
/// up on it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Queued, nothing uploaded yet
    Pending,
    /// Bytes are being transferred
    Uploading,
    /// Uploaded, text extraction still running
    Processing,
    /// Blob and extracted text are durable
    Completed,
    /// Pipeline gave up
    Failed,
}

impl FileStatus {
    /// Whether this entry's blobs exist and may be copied
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A single uploaded file attached to a files node
///
/// `completed` entries reference blobs that exist in the storage namespace
/// keyed by `id`. The secondary extracted-text URL is optional; an empty
/// string means absent, matching the stored document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// Identifier, also the key of the blob folder holding this file
    pub id: FileId,
    /// Original filename shown on the canvas
    pub name: String,
    /// Upload lifecycle status
    pub status: FileStatus,
    /// Primary blob URL; empty until the upload completes
    #[serde(default)]
    pub file_blob_url: String,
    /// Extracted-text blob URL; empty when no text was extracted
    #[serde(default)]
    pub text_data_url: String,
    /// Fields the canvas stores on entries that this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileData {
    /// New entry in `pending` state, before any upload happened
    #[must_use]
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            id: FileId::generate(),
            name: name.into(),
            status: FileStatus::Pending,
            file_blob_url: String::new(),
            text_data_url: String::new(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FileStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::from_str::<FileStatus>("\"pending\"").unwrap(),
            FileStatus::Pending
        );
    }

    #[test]
    fn file_data_round_trips_with_unknown_fields() {
        let json = r#"{
            "id": "fl_abc",
            "name": "report.pdf",
            "status": "completed",
            "fileBlobUrl": "https://blob.local/files/fl_abc/report.pdf",
            "textDataUrl": "https://blob.local/files/fl_abc/report.md",
            "contentType": "application/pdf"
        }"#;

        let data: FileData = serde_json::from_str(json).unwrap();
        assert_eq!(data.name, "report.pdf");
        assert!(data.status.is_completed());
        assert_eq!(data.extra["contentType"], "application/pdf");

        let back: Value = serde_json::to_value(&data).unwrap();
        assert_eq!(back["contentType"], "application/pdf");
        assert_eq!(back["fileBlobUrl"], "https://blob.local/files/fl_abc/report.pdf");
    }

    #[test]
    fn missing_urls_default_to_empty() {
        let json = r#"{"id": "fl_x", "name": "notes.txt", "status": "pending"}"#;
        let data: FileData = serde_json::from_str(json).unwrap();
        assert_eq!(data.file_blob_url, "");
        assert_eq!(data.text_data_url, "");
    }
}
