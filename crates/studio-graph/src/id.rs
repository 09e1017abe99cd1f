//! Prefixed opaque identifiers
//!
//! Every entity in a playground document is addressed by a string identifier
//! carrying a type prefix (`agnt_…`, `grph_…`, `nd_…`, `fl_…`) followed by a
//! random hex payload. Identifiers are compared as opaque strings; the prefix
//! only matters when parsing untrusted input with [`FromStr`].
//!
//! On the wire each identifier is a plain JSON string, so deserialization is
//! transparent and does not re-validate the prefix; documents are trusted
//! once fetched from storage.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Prefix did not match the expected entity type
    #[error("expected `{expected}_` prefix, got `{actual}`")]
    WrongPrefix {
        /// Prefix the entity type requires
        expected: &'static str,
        /// Identifier that was parsed
        actual: String,
    },
    /// Identifier had nothing after the prefix
    #[error("empty identifier payload")]
    EmptyPayload,
}

fn parse_prefixed(s: &str, prefix: &'static str) -> Result<String, IdError> {
    let payload = s
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or_else(|| IdError::WrongPrefix {
            expected: prefix,
            actual: s.to_string(),
        })?;
    if payload.is_empty() {
        return Err(IdError::EmptyPayload);
    }
    Ok(s.to_string())
}

fn generate_prefixed(prefix: &'static str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Identifier of an agent (a playground and its stored record)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Prefix carried by agent identifiers
    pub const PREFIX: &'static str = "agnt";

    /// Generate a fresh identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_prefixed(Self::PREFIX))
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AgentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

/// Identifier of a persisted graph document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    /// Prefix carried by graph identifiers
    pub const PREFIX: &'static str = "grph";

    /// Generate a fresh identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_prefixed(Self::PREFIX))
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GraphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GraphId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

/// Identifier of a node within a graph document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Prefix carried by node identifiers
    pub const PREFIX: &'static str = "nd";

    /// Generate a fresh identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_prefixed(Self::PREFIX))
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

/// Identifier of a file entry and of the blob folder holding its content
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Prefix carried by file identifiers
    pub const PREFIX: &'static str = "fl";

    /// Generate a fresh identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_prefixed(Self::PREFIX))
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FileId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(NodeId::generate(), NodeId::generate());
        assert_ne!(FileId::generate(), FileId::generate());
    }

    #[test]
    fn generated_ids_carry_prefix() {
        assert!(AgentId::generate().as_str().starts_with("agnt_"));
        assert!(GraphId::generate().as_str().starts_with("grph_"));
        assert!(NodeId::generate().as_str().starts_with("nd_"));
        assert!(FileId::generate().as_str().starts_with("fl_"));
    }

    #[test]
    fn parse_round_trips() {
        let id = FileId::generate();
        let parsed: FileId = id.as_str().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        let err = "nd_abc123".parse::<FileId>().unwrap_err();
        assert!(matches!(err, IdError::WrongPrefix { expected: "fl", .. }));
    }

    #[test]
    fn parse_rejects_empty_payload() {
        assert_eq!("nd_".parse::<NodeId>().unwrap_err(), IdError::EmptyPayload);
    }

    #[test]
    fn serde_is_transparent() {
        let id = NodeId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
