//! Blob path conventions
//!
//! File content lives under a per-file folder keyed by the file identifier;
//! persisted graph documents live under per-document folders keyed by a
//! fresh graph identifier.

use studio_graph::{FileId, GraphId};

/// Folder holding every blob that belongs to one file entry
#[must_use]
pub fn file_folder_path(id: &FileId) -> String {
    format!("files/{id}")
}

/// Folder holding one persisted graph document
#[must_use]
pub fn graph_folder_path(id: &GraphId) -> String {
    format!("graphs/{id}")
}

/// Join two path segments with a single separator
#[must_use]
pub fn path_join(base: &str, rest: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        rest.trim_start_matches('/')
    )
}

/// Final segment of a blob pathname
#[must_use]
pub fn pathname_to_filename(pathname: &str) -> &str {
    pathname.rsplit('/').next().unwrap_or(pathname)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn file_folder_uses_id() {
        let id = FileId::from_str("fl_abc123").unwrap();
        assert_eq!(file_folder_path(&id), "files/fl_abc123");
    }

    #[test]
    fn join_normalizes_separators() {
        assert_eq!(path_join("files/fl_a", "report.pdf"), "files/fl_a/report.pdf");
        assert_eq!(path_join("files/fl_a/", "/report.pdf"), "files/fl_a/report.pdf");
    }

    #[test]
    fn filename_is_last_segment() {
        assert_eq!(pathname_to_filename("files/fl_a/report.pdf"), "report.pdf");
        assert_eq!(pathname_to_filename("report.pdf"), "report.pdf");
        assert_eq!(pathname_to_filename("files/fl_a/"), "");
    }
}
