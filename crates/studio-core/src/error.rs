//! Error types for playground operations
//!
//! Every duplication failure is terminal for that invocation: there are no
//! retryable errors and no partial-success reporting. The page never sees
//! these types directly; [`crate::DuplicationOutcome`] folds them into the
//! tagged result object the client renders.

use studio_graph::AgentId;
use studio_store::StoreError;

/// Failures of the file-duplication operation
#[derive(Debug, thiserror::Error)]
pub enum DuplicationError {
    /// The agent identifier was empty
    #[error("Please fill in the agent id")]
    MissingAgentId,

    /// No record for the agent, or the record has no persisted document
    #[error("{0} is not found.")]
    AgentNotFound(AgentId),

    /// The target node is not a files node
    #[error("Invalid target file node")]
    InvalidTargetNode,

    /// A storage collaborator failed mid-operation
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl DuplicationError {
    /// Whether this failure was raised by input validation, before any
    /// document fetch or blob call
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingAgentId | Self::InvalidTargetNode)
    }

    /// Message shown on the page
    ///
    /// Validation and lookup failures read as-is; collaborator failures are
    /// wrapped the way the page has always reported them.
    #[must_use]
    pub fn page_message(&self) -> String {
        match self {
            Self::Store(err) => format!("Failed to copy files: {err}"),
            other => other.to_string(),
        }
    }
}

/// Failures of the playground page load
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    /// Agent missing, or the requester is not a member of its team
    #[error("agent not found")]
    NotFound,

    /// A storage collaborator failed
    #[error("{0}")]
    Store(#[from] StoreError),
}
