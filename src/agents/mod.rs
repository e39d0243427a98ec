//! Agent definitions: identity, platform tools and instruction text for the
//! six Agent Builder agents. Static data only.

pub mod capacity;
pub mod discharge;
pub mod guardian;
pub mod orchestrator;
pub mod recovery;
pub mod triage;

use serde::Serialize;
use serde_json::Value;

/// Built-in console tools every agent is given.
pub const PLATFORM_TOOLS: [&str; 3] = [
    "platform.core.execute_esql",
    "platform.core.search",
    "platform.core.get_index_mapping",
];

const PLATFORM_PREFIX: &str = "platform.core.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDefinition {
    pub agent_id: &'static str,
    pub display_name: &'static str,
    pub display_description: &'static str,
    pub tools: Vec<&'static str>,
    pub custom_instructions: &'static str,
}

impl AgentDefinition {
    pub(crate) fn new(
        agent_id: &'static str,
        display_name: &'static str,
        display_description: &'static str,
        custom_instructions: &'static str,
    ) -> Self {
        Self {
            agent_id,
            display_name,
            display_description,
            tools: PLATFORM_TOOLS.to_vec(),
            custom_instructions,
        }
    }

    /// Tool ids without the `platform.core.` prefix, for display.
    pub fn short_tool_names(&self) -> Vec<&'static str> {
        self.tools
            .iter()
            .copied()
            .map(|t| t.strip_prefix(PLATFORM_PREFIX).unwrap_or(t))
            .collect()
    }

    /// Body for the console's create-agent call. The LLM connector is
    /// attached only when one is configured.
    pub fn registration_payload(&self, connector_id: Option<&str>) -> Value {
        let mut payload = serde_json::json!({
            "id": self.agent_id,
            "agent_id": self.agent_id,
            "display_name": self.display_name,
            "display_description": self.display_description,
            "tools": self.tools,
            "custom_instructions": self.custom_instructions,
        });
        if let Some(id) = connector_id {
            payload["connector_id"] = Value::String(id.to_string());
        }
        payload
    }
}

/// All agents in presentation order; the orchestrator comes last.
pub fn all_agents() -> Vec<AgentDefinition> {
    vec![
        triage::definition(),
        recovery::definition(),
        capacity::definition(),
        discharge::definition(),
        guardian::definition(),
        orchestrator::definition(),
    ]
}
