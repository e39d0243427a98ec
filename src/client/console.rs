use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use super::transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody, Transport,
};
use super::{create_outcome, delete_outcome, expect_json, ClientError, Outcome};
use crate::config::{self, ConsoleSettings, Settings};

const ASSISTANT_API: &str = "internal/elastic_assistant";

/// Console (Kibana Agent Builder) API client.
pub struct ConsoleClient {
    base_url: String,
    api_key: String,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

/// Identity of a registered agent as returned by `list_agents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSummary {
    pub id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
}

impl AgentSummary {
    /// True when `key` is this agent's name or display name.
    pub fn is_named(&self, key: &str) -> bool {
        self.name.as_deref() == Some(key) || self.display_name.as_deref() == Some(key)
    }
}

/// Listing entry as sent. Consoles echo stored definitions, so `id` and
/// `agent_id` (or `name` and `display_name`) may both be present.
#[derive(Deserialize)]
struct ListedAgent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    agent_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

impl ListedAgent {
    fn into_summary(self) -> Option<AgentSummary> {
        let id = self.id.or(self.agent_id)?;
        Some(AgentSummary {
            id,
            name: self.name,
            display_name: self.display_name,
        })
    }
}

/// Listing responses come back either as a bare array or wrapped.
#[derive(Deserialize)]
#[serde(untagged)]
enum AgentListing {
    Bare(Vec<ListedAgent>),
    Results { results: Vec<ListedAgent> },
    Data { data: Vec<ListedAgent> },
    Agents { agents: Vec<ListedAgent> },
}

impl AgentListing {
    fn into_vec(self) -> Vec<ListedAgent> {
        match self {
            Self::Bare(v) => v,
            Self::Results { results } => results,
            Self::Data { data } => data,
            Self::Agents { agents } => agents,
        }
    }
}

/// A converse reply: best-effort text plus the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseReply {
    pub text: String,
    pub raw: Value,
}

impl ConverseReply {
    fn from_body(raw: Value) -> Self {
        let text = reply_text(&raw).unwrap_or_else(|| raw.to_string());
        Self { text, raw }
    }
}

/// `message`, then `response`, looking one level into objects for the
/// usual text fields.
fn reply_text(body: &Value) -> Option<String> {
    for key in ["message", "response"] {
        match body.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                for field in ["message", "content", "text"] {
                    if let Some(Value::String(s)) = inner.get(field) {
                        return Some(s.clone());
                    }
                }
            }
            _ => {}
        }
    }
    None
}

impl ConsoleClient {
    pub fn new(
        console: &ConsoleSettings,
        timeout_secs: u64,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: console.url.trim_end_matches('/').to_string(),
            api_key: console.api_key.clone(),
            transport,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Validate settings and connect over HTTP. Fails with
    /// [`ClientError::ConsoleNotConfigured`] when URL or key is absent.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        settings.validate()?;
        let console = settings.console().ok_or(ClientError::ConsoleNotConfigured)?;
        tracing::info!(
            url = %console.url,
            key = %config::redacted_key(&console.api_key),
            "Console client configured"
        );
        Ok(Self::new(
            &console,
            settings.request_timeout_secs,
            Arc::new(HttpTransport::new()?),
        ))
    }

    /// Console URL for `segments` under the assistant API. Each segment is
    /// percent-encoded, so ids cannot add path components or a query.
    fn url(&self, segments: &[&str]) -> Result<String, ClientError> {
        let invalid =
            |why: String| ClientError::Http(format!("console URL {}: {why}", self.base_url));
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(ASSISTANT_API.split('/'))
            .extend(segments);
        Ok(url.to_string())
    }

    fn call(
        &self,
        method: HttpMethod,
        segments: &[&str],
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest {
            method,
            url: self.url(segments)?,
            headers: vec![
                ("Authorization".to_string(), format!("ApiKey {}", self.api_key)),
                ("kbn-xsrf".to_string(), "true".to_string()),
                ("elastic-api-version".to_string(), "1".to_string()),
            ],
            body,
            timeout: self.timeout,
        };
        self.transport.execute(&request)
    }

    fn create(&self, collection: &str, definition: &Value) -> Result<Outcome, ClientError> {
        let body = RequestBody::Json(definition.clone());
        create_outcome(self.call(HttpMethod::Post, &[collection], body)?, true)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<Outcome, ClientError> {
        delete_outcome(self.call(HttpMethod::Delete, &[collection, id], RequestBody::Empty)?)
    }

    // ── Agents ──────────────────────────────────────────────

    pub fn create_agent(&self, definition: &Value) -> Result<Outcome, ClientError> {
        self.create("agents", definition)
    }

    pub fn delete_agent(&self, agent_id: &str) -> Result<Outcome, ClientError> {
        self.delete("agents", agent_id)
    }

    pub fn list_agents(&self) -> Result<Vec<AgentSummary>, ClientError> {
        let body = expect_json(self.call(HttpMethod::Get, &["agents"], RequestBody::Empty)?)?;
        let listing: AgentListing = serde_json::from_value(body)
            .map_err(|e| ClientError::ResponseParsing(format!("agent listing: {e}")))?;
        let mut agents = Vec::new();
        for entry in listing.into_vec() {
            match entry.into_summary() {
                Some(summary) => agents.push(summary),
                None => tracing::warn!("Skipping listed agent without an id"),
            }
        }
        Ok(agents)
    }

    // ── Tools and workflows ─────────────────────────────────

    pub fn create_tool(&self, definition: &Value) -> Result<Outcome, ClientError> {
        self.create("tools", definition)
    }

    pub fn delete_tool(&self, tool_id: &str) -> Result<Outcome, ClientError> {
        self.delete("tools", tool_id)
    }

    pub fn create_workflow(&self, definition: &Value) -> Result<Outcome, ClientError> {
        self.create("workflows", definition)
    }

    pub fn delete_workflow(&self, workflow_id: &str) -> Result<Outcome, ClientError> {
        self.delete("workflows", workflow_id)
    }

    // ── Conversation ────────────────────────────────────────

    /// Send one message to an agent and wait for its reply.
    pub fn converse(&self, agent_id: &str, message: &str) -> Result<ConverseReply, ClientError> {
        let body = RequestBody::Json(json!({ "message": message }));
        let response = self.call(HttpMethod::Post, &["agents", agent_id, "converse"], body)?;
        let raw = expect_json(response)?;
        Ok(ConverseReply::from_body(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::search::tests::test_settings;
    use crate::client::MockTransport;

    fn client_with(mock: MockTransport) -> (ConsoleClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let console = test_settings().console().unwrap();
        (ConsoleClient::new(&console, 30, mock.clone()), mock)
    }

    #[test]
    fn console_headers_present() {
        let (client, mock) = client_with(MockTransport::new());
        client.create_tool(&json!({"name": "t"})).unwrap();
        let req = &mock.requests()[0];
        assert_eq!(req.url, "https://kb.test/internal/elastic_assistant/tools");
        assert_eq!(req.header("kbn-xsrf"), Some("true"));
        assert_eq!(req.header("elastic-api-version"), Some("1"));
        assert_eq!(req.header("Authorization"), Some("ApiKey kb-key-0123456789abcdef"));
    }

    #[test]
    fn create_conflict_is_already_exists() {
        let (client, _) =
            client_with(MockTransport::new().with_response(409, r#"{"message":"exists"}"#));
        assert_eq!(
            client.create_agent(&json!({"id": "triage-agent"})).unwrap(),
            Outcome::AlreadyExists
        );
    }

    #[test]
    fn delete_missing_workflow_is_not_found() {
        let (client, mock) = client_with(MockTransport::new().with_response(404, ""));
        assert_eq!(client.delete_workflow("wf-1").unwrap(), Outcome::NotFound);
        assert_eq!(
            mock.requests()[0].url,
            "https://kb.test/internal/elastic_assistant/workflows/wf-1"
        );
    }

    #[test]
    fn list_agents_accepts_wrapped_and_bare() {
        let (client, _) = client_with(
            MockTransport::new()
                .with_response(200, r#"{"results":[{"id":"a1","name":"triage-agent"}]}"#)
                .with_response(200, r#"[{"agent_id":"a2","display_name":"Guardian"}]"#),
        );
        let wrapped = client.list_agents().unwrap();
        assert_eq!(wrapped[0].id, "a1");
        assert_eq!(wrapped[0].name.as_deref(), Some("triage-agent"));
        let bare = client.list_agents().unwrap();
        assert_eq!(bare[0].id, "a2");
    }

    #[test]
    fn list_agents_reads_echoed_definitions() {
        let (client, _) = client_with(
            MockTransport::new()
                .with_response(
                    200,
                    r#"{"results":[{"id":"triage-agent","agent_id":"triage-agent","display_name":"Triage Agent"}]}"#,
                )
                .with_response(
                    200,
                    r#"[{"id":"a1","name":"triage-agent","display_name":"Triage Agent"}]"#,
                ),
        );
        let echoed = client.list_agents().unwrap();
        assert_eq!(echoed.len(), 1);
        assert_eq!(echoed[0].id, "triage-agent");
        assert!(echoed[0].is_named("Triage Agent"));
        let both_names = client.list_agents().unwrap();
        assert_eq!(both_names[0].id, "a1");
        assert!(both_names[0].is_named("triage-agent"));
        assert!(both_names[0].is_named("Triage Agent"));
    }

    #[test]
    fn list_agents_skips_entries_without_id() {
        let (client, _) = client_with(MockTransport::new().with_response(
            200,
            r#"{"agents":[{"name":"orphan"},{"agent_id":"guardian-agent"}]}"#,
        ));
        let agents = client.list_agents().unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id, "guardian-agent");
    }

    #[test]
    fn delete_agent_and_tool_paths() {
        let (client, mock) = client_with(
            MockTransport::new()
                .with_response(200, r#"{"success":true}"#)
                .with_response(404, "")
                .with_response(200, r#"{"success":true}"#)
                .with_response(404, ""),
        );
        assert!(client.delete_agent("triage-agent").unwrap().is_applied());
        assert_eq!(client.delete_agent("triage-agent").unwrap(), Outcome::NotFound);
        assert!(client.delete_tool("latest_vitals").unwrap().is_applied());
        assert_eq!(client.delete_tool("latest_vitals").unwrap(), Outcome::NotFound);

        let reqs = mock.requests();
        assert!(reqs.iter().all(|r| r.method == HttpMethod::Delete));
        assert_eq!(
            reqs[0].url,
            "https://kb.test/internal/elastic_assistant/agents/triage-agent"
        );
        assert_eq!(
            reqs[2].url,
            "https://kb.test/internal/elastic_assistant/tools/latest_vitals"
        );
    }

    #[test]
    fn ids_are_encoded_as_one_path_segment() {
        let (client, mock) = client_with(MockTransport::new().with_response(404, ""));
        client.delete_agent("team/a?x=1").unwrap();
        client.converse("a b", "hi").unwrap();
        let reqs = mock.requests();
        assert_eq!(
            reqs[0].url,
            "https://kb.test/internal/elastic_assistant/agents/team%2Fa%3Fx=1"
        );
        assert_eq!(
            reqs[1].url,
            "https://kb.test/internal/elastic_assistant/agents/a%20b/converse"
        );
    }

    #[test]
    fn list_agents_rejects_unknown_shape() {
        let (client, _) = client_with(MockTransport::new().with_response(200, r#"{"total":3}"#));
        assert!(matches!(client.list_agents(), Err(ClientError::ResponseParsing(_))));
    }

    #[test]
    fn converse_extracts_reply_text() {
        let (client, mock) = client_with(
            MockTransport::new()
                .with_response(200, r#"{"message":"MEWS 6, high risk"}"#)
                .with_response(200, r#"{"response":{"message":"Recovery score 82"}}"#)
                .with_response(200, r#"{"steps":[]}"#),
        );
        assert_eq!(client.converse("a1", "hi").unwrap().text, "MEWS 6, high risk");
        assert_eq!(client.converse("a1", "hi").unwrap().text, "Recovery score 82");
        assert_eq!(client.converse("a1", "hi").unwrap().text, r#"{"steps":[]}"#);
        let req = &mock.requests()[0];
        assert_eq!(
            req.url,
            "https://kb.test/internal/elastic_assistant/agents/a1/converse"
        );
        assert_eq!(req.body, RequestBody::Json(json!({"message": "hi"})));
    }

    #[test]
    fn missing_console_settings_rejected() {
        let mut settings = test_settings();
        settings.kibana_url.clear();
        assert!(matches!(
            ConsoleClient::from_settings(&settings),
            Err(ClientError::ConsoleNotConfigured)
        ));
    }
}
