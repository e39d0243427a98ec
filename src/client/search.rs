use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use super::bulk::{self, BulkSummary, WriteMode};
use super::transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody, Transport,
};
use super::{create_outcome, delete_outcome, expect_json, ClientError, Outcome};
use crate::config::{self, Settings};
use crate::models::{DecisionRecord, DischargePlan, Document};

/// Search-engine API client (`Authorization: ApiKey <key>`).
pub struct SearchClient {
    base_url: String,
    api_key: String,
    transport: Arc<dyn Transport>,
    timeout: Duration,
    bulk_timeout: Duration,
    bulk_error_limit: usize,
}

impl SearchClient {
    pub fn new(settings: &Settings, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: settings.es_url.trim_end_matches('/').to_string(),
            api_key: settings.es_api_key.clone(),
            transport,
            timeout: Duration::from_secs(settings.request_timeout_secs),
            bulk_timeout: Duration::from_secs(settings.bulk_timeout_secs),
            bulk_error_limit: settings.bulk_error_limit,
        }
    }

    /// Validate settings and connect over HTTP.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        settings.validate()?;
        tracing::info!(
            url = %settings.es_url,
            key = %config::redacted_key(&settings.es_api_key),
            "Search client configured"
        );
        Ok(Self::new(settings, Arc::new(HttpTransport::new()?)))
    }

    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        timeout: Duration,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest {
            method,
            url: format!("{}/{}", self.base_url, path.trim_start_matches('/')),
            headers: vec![(
                "Authorization".to_string(),
                format!("ApiKey {}", self.api_key),
            )],
            body,
            timeout,
        };
        self.transport.execute(&request)
    }

    fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        self.request(method, path, body, self.timeout)
    }

    // ── Index lifecycle ─────────────────────────────────────

    pub fn create_index(&self, name: &str, body: &Value) -> Result<Outcome, ClientError> {
        let response = self.call(HttpMethod::Put, name, RequestBody::Json(body.clone()))?;
        create_outcome(response, false)
    }

    pub fn delete_index(&self, name: &str) -> Result<Outcome, ClientError> {
        delete_outcome(self.call(HttpMethod::Delete, name, RequestBody::Empty)?)
    }

    /// Create or replace an index template.
    pub fn put_index_template(&self, name: &str, body: &Value) -> Result<Value, ClientError> {
        let path = format!("_index_template/{name}");
        expect_json(self.call(HttpMethod::Put, &path, RequestBody::Json(body.clone()))?)
    }

    pub fn delete_index_template(&self, name: &str) -> Result<Outcome, ClientError> {
        let path = format!("_index_template/{name}");
        delete_outcome(self.call(HttpMethod::Delete, &path, RequestBody::Empty)?)
    }

    pub fn create_data_stream(&self, name: &str) -> Result<Outcome, ClientError> {
        let path = format!("_data_stream/{name}");
        create_outcome(self.call(HttpMethod::Put, &path, RequestBody::Empty)?, false)
    }

    pub fn delete_data_stream(&self, name: &str) -> Result<Outcome, ClientError> {
        let path = format!("_data_stream/{name}");
        delete_outcome(self.call(HttpMethod::Delete, &path, RequestBody::Empty)?)
    }

    /// Make recent writes visible to search.
    pub fn refresh(&self, index: &str) -> Result<Value, ClientError> {
        let path = format!("{index}/_refresh");
        expect_json(self.call(HttpMethod::Post, &path, RequestBody::Empty)?)
    }

    // ── Documents ───────────────────────────────────────────

    /// Write `docs` in a single `_bulk` request.
    pub fn bulk<D: Document>(
        &self,
        index: &str,
        docs: &[D],
        mode: WriteMode,
    ) -> Result<BulkSummary, ClientError> {
        if docs.is_empty() {
            return Ok(BulkSummary { indexed: 0 });
        }
        let payload = bulk::encode(index, docs, mode)?;
        let response = self.request(
            HttpMethod::Post,
            "_bulk",
            RequestBody::NdJson(payload),
            self.bulk_timeout,
        )?;
        let body = expect_json(response)?;
        let summary = bulk::check_response(&body, docs.len(), self.bulk_error_limit)?;
        tracing::debug!(index, mode = mode.as_str(), count = summary.indexed, "Bulk write");
        Ok(summary)
    }

    /// Write one document: `PUT _doc/{id}` when it has an id, else `POST _doc`.
    pub fn index_doc<D: Document>(&self, index: &str, doc: &D) -> Result<Value, ClientError> {
        let body = RequestBody::Json(serde_json::to_value(doc)?);
        let response = match doc.doc_id() {
            Some(id) => self.call(HttpMethod::Put, &format!("{index}/_doc/{id}"), body)?,
            None => self.call(HttpMethod::Post, &format!("{index}/_doc"), body)?,
        };
        expect_json(response)
    }

    pub fn search(&self, index: &str, body: &Value) -> Result<Value, ClientError> {
        let path = format!("{index}/_search");
        expect_json(self.call(HttpMethod::Post, &path, RequestBody::Json(body.clone()))?)
    }

    /// Run an ES|QL query. `params` bind `?name` placeholders, e.g.
    /// `[{"patient_id": "PAT-001"}]`.
    pub fn esql_query(&self, query: &str, params: &[Value]) -> Result<Value, ClientError> {
        let mut body = json!({ "query": query });
        if !params.is_empty() {
            body["params"] = Value::Array(params.to_vec());
        }
        expect_json(self.call(HttpMethod::Post, "_query", RequestBody::Json(body))?)
    }

    // ── Typed writes ────────────────────────────────────────

    /// Append an agent decision to the audit log.
    pub fn record_decision(&self, record: &DecisionRecord) -> Result<Value, ClientError> {
        self.index_doc(config::INDEX_DECISIONS, record)
    }

    /// Create or replace the discharge plan for its patient.
    pub fn put_discharge_plan(&self, plan: &DischargePlan) -> Result<Value, ClientError> {
        self.index_doc(config::INDEX_DISCHARGE, plan)
    }
}
