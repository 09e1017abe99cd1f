//! Playground page-load scenarios

use async_trait::async_trait;
use studio_core::{
    load_playground, FeatureFlags, MembershipSource, PlaygroundError, TeamMembership, TeamRole,
};
use studio_graph::AgentId;
use studio_store::{AgentRecord, MemoryAgentStore, StoreError};

struct StaticMembership(Option<TeamMembership>);

#[async_trait]
impl MembershipSource for StaticMembership {
    async fn team_membership(
        &self,
        _agent_id: &AgentId,
        _user_id: &str,
    ) -> Result<Option<TeamMembership>, StoreError> {
        Ok(self.0.clone())
    }
}

struct StaticFlags {
    upload: bool,
    web_search: bool,
}

#[async_trait]
impl FeatureFlags for StaticFlags {
    async fn upload_file_to_prompt_node(&self) -> bool {
        self.upload
    }

    async fn web_search_node(&self) -> bool {
        self.web_search
    }
}

fn member() -> StaticMembership {
    StaticMembership(Some(TeamMembership {
        team_id: "team_1".to_string(),
        role: TeamRole::Member,
    }))
}

#[tokio::test]
async fn loads_record_membership_and_flags() {
    let agents = MemoryAgentStore::new();
    let agent_id = AgentId::generate();
    agents.insert(AgentRecord::new(agent_id.clone(), "My agent").with_graph_url("https://g"));

    let view = load_playground(
        &agents,
        &member(),
        &StaticFlags {
            upload: true,
            web_search: false,
        },
        &agent_id,
        "user_1",
    )
    .await
    .unwrap();

    assert_eq!(view.agent_id, agent_id);
    assert_eq!(view.record.name, "My agent");
    assert_eq!(view.membership.role, TeamRole::Member);
    assert!(view.flags.upload_file_to_prompt_node);
    assert!(!view.flags.web_search_node);
}

#[tokio::test]
async fn outsider_gets_not_found() {
    let agents = MemoryAgentStore::new();
    let agent_id = AgentId::generate();
    agents.insert(AgentRecord::new(agent_id.clone(), "My agent"));

    let err = load_playground(
        &agents,
        &StaticMembership(None),
        &StaticFlags {
            upload: false,
            web_search: false,
        },
        &agent_id,
        "stranger",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlaygroundError::NotFound));
}

#[tokio::test]
async fn missing_record_gets_not_found() {
    let agents = MemoryAgentStore::new();

    let err = load_playground(
        &agents,
        &member(),
        &StaticFlags {
            upload: false,
            web_search: false,
        },
        &AgentId::generate(),
        "user_1",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlaygroundError::NotFound));
}
