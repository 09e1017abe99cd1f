//! Playground page load
//!
//! Assembles everything the playground canvas needs for one agent: the
//! stored record, the team-membership gate, and the feature flags that
//! decide which node types the canvas offers. The agent identifier travels
//! explicitly through the call chain. There is no ambient context to read
//! it from, so "used outside provider" failures cannot exist.

use crate::error::PlaygroundError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_graph::AgentId;
use studio_store::{AgentRecord, AgentStore, StoreError};

/// Role of a user within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Can manage the team and its agents
    Admin,
    /// Can edit agents
    Member,
}

/// Membership of a user in the team that owns an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    /// Team identifier
    pub team_id: String,
    /// Role of the requesting user
    pub role: TeamRole,
}

/// Resolves team membership (the auth layer in production)
#[async_trait]
pub trait MembershipSource: Send + Sync {
    /// Membership of `user_id` in the team owning `agent_id`, if any
    async fn team_membership(
        &self,
        agent_id: &AgentId,
        user_id: &str,
    ) -> Result<Option<TeamMembership>, StoreError>;
}

#[async_trait]
impl<M: MembershipSource + ?Sized> MembershipSource for Arc<M> {
    async fn team_membership(
        &self,
        agent_id: &AgentId,
        user_id: &str,
    ) -> Result<Option<TeamMembership>, StoreError> {
        (**self).team_membership(agent_id, user_id).await
    }
}

/// Evaluates feature flags for one render
#[async_trait]
pub trait FeatureFlags: Send + Sync {
    /// Whether prompt nodes accept file uploads
    async fn upload_file_to_prompt_node(&self) -> bool;

    /// Whether the web-search node type is offered
    async fn web_search_node(&self) -> bool;
}

#[async_trait]
impl<F: FeatureFlags + ?Sized> FeatureFlags for Arc<F> {
    async fn upload_file_to_prompt_node(&self) -> bool {
        (**self).upload_file_to_prompt_node().await
    }

    async fn web_search_node(&self) -> bool {
        (**self).web_search_node().await
    }
}

/// Flag snapshot carried to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundFlags {
    /// Prompt nodes accept file uploads
    pub upload_file_to_prompt_node: bool,
    /// Web-search node type is offered
    pub web_search_node: bool,
}

/// Everything the playground page renders from
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundView {
    /// Agent the canvas edits
    pub agent_id: AgentId,
    /// Stored record, including the graph document pointer
    pub record: AgentRecord,
    /// Membership that granted access
    pub membership: TeamMembership,
    /// Feature flags evaluated for this render
    pub flags: PlaygroundFlags,
}

/// Load the playground view for one agent.
///
/// The membership gate runs first: a requester outside the agent's team gets
/// [`PlaygroundError::NotFound`], indistinguishable from the agent not
/// existing. Flags are evaluated concurrently; the record lookup follows.
pub async fn load_playground<A, M, F>(
    agents: &A,
    membership: &M,
    flags: &F,
    agent_id: &AgentId,
    user_id: &str,
) -> Result<PlaygroundView, PlaygroundError>
where
    A: AgentStore,
    M: MembershipSource,
    F: FeatureFlags,
{
    let membership = membership
        .team_membership(agent_id, user_id)
        .await?
        .ok_or(PlaygroundError::NotFound)?;

    let (upload_file_to_prompt_node, web_search_node) =
        futures::join!(flags.upload_file_to_prompt_node(), flags.web_search_node());

    let record = agents
        .get(agent_id)
        .await?
        .ok_or(PlaygroundError::NotFound)?;

    tracing::debug!(agent_id = %agent_id, "playground view loaded");

    Ok(PlaygroundView {
        agent_id: agent_id.clone(),
        record,
        membership,
        flags: PlaygroundFlags {
            upload_file_to_prompt_node,
            web_search_node,
        },
    })
}
