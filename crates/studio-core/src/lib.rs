//! Studio Core - playground operations
//!
//! The operations playground pages invoke against their storage
//! collaborators:
//! - Duplicating a files node inside a graph document ([`FileDuplicator`])
//! - Loading the playground view for one agent ([`load_playground`])
//! - Measuring external blob calls ([`telemetry`])
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use studio_core::{FileDuplicator, TracingSink};
//! use studio_store::{MemoryAgentStore, MemoryBlobStore};
//!
//! # async fn example(agent_id: &studio_graph::AgentId, node: &studio_graph::Node) {
//! let duplicator = FileDuplicator::new(
//!     Arc::new(MemoryAgentStore::new()),
//!     Arc::new(MemoryBlobStore::new()),
//!     TracingSink,
//! );
//! let outcome = duplicator.duplicate(agent_id, node).await;
//! println!("{}", outcome.message());
//! # }
//! ```

// Core modules
pub mod duplication;
pub mod error;
pub mod playground;
pub mod telemetry;

// Re-exports for convenience
pub use duplication::{DuplicationOutcome, DuplicatorConfig, FileDuplicator};
pub use error::{DuplicationError, PlaygroundError};
pub use playground::{
    load_playground, FeatureFlags, MembershipSource, PlaygroundFlags, PlaygroundView,
    TeamMembership, TeamRole,
};
pub use telemetry::{
    measure, BlobOperation, ExternalService, Measurement, TelemetrySink, TracingSink,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with playground operations
    pub use crate::{
        load_playground, DuplicationOutcome, DuplicatorConfig, FileDuplicator, PlaygroundView,
        TelemetrySink, TracingSink,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
