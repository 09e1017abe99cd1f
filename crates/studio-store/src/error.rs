//! Error type shared by storage collaborators

/// Failures surfaced by storage collaborators
///
/// Every variant is terminal for the operation that hit it: callers do not
/// retry, they abort and report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record exists for the requested identifier
    #[error("record not found: {0}")]
    NotFound(String),

    /// No blob exists at the requested URL or pathname
    #[error("blob not found: {0}")]
    BlobNotFound(String),

    /// The graph-document pointer moved since it was read
    #[error("graph url conflict: expected {expected:?}, found {actual:?}")]
    Conflict {
        /// Pointer value the caller read before mutating
        expected: Option<String>,
        /// Pointer value actually stored
        actual: Option<String>,
    },

    /// Document failed to encode or decode
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing service reported a failure
    #[error("{}", backend_message(.0))]
    Backend(String),
}

impl StoreError {
    /// Whether this failure is a lost optimistic-concurrency race
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

// Backend failures can arrive without any message attached.
fn backend_message(message: &str) -> &str {
    if message.is_empty() {
        "Unknown error"
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_display() {
        let err = StoreError::Backend("connection reset".to_string());
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn messageless_backend_error_display() {
        let err = StoreError::Backend(String::new());
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn conflict_classification() {
        let err = StoreError::Conflict {
            expected: Some("https://a".to_string()),
            actual: Some("https://b".to_string()),
        };
        assert!(err.is_conflict());
        assert!(!StoreError::NotFound("agnt_x".to_string()).is_conflict());
    }
}
