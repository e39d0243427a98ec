//! In-memory stand-in for the search engine and console, for tests.
//!
//! Models just enough behaviour to exercise the real request paths: index
//! and data-stream existence, `_id` overwrite vs create conflicts, and
//! time-series id derivation from dimensions plus `@timestamp`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use serde_json::{json, Value};

use super::transport::{ApiRequest, ApiResponse, HttpMethod, RequestBody, Transport};
use super::ClientError;

const TSDS_DIMENSIONS: [&str; 2] = ["patient_id", "ward"];

#[derive(Default)]
struct State {
    indices: HashMap<String, BTreeMap<String, Value>>,
    data_streams: HashSet<String>,
    templates: HashMap<String, Value>,
    console: HashMap<String, BTreeMap<String, Value>>,
    next_id: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}

fn error(status: u16, kind: &str, reason: &str) -> ApiResponse {
    reply(
        status,
        json!({"error": {"type": kind, "reason": reason}, "status": status}),
    )
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doc_count(&self, index: &str) -> usize {
        self.with_state(|s| s.indices.get(index).map_or(0, BTreeMap::len))
    }

    pub fn doc(&self, index: &str, id: &str) -> Option<Value> {
        self.with_state(|s| s.indices.get(index).and_then(|docs| docs.get(id).cloned()))
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.with_state(|s| s.indices.contains_key(index))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.with_state(|s| s.templates.contains_key(name))
    }

    pub fn is_data_stream(&self, name: &str) -> bool {
        self.with_state(|s| s.data_streams.contains(name))
    }

    /// Ids registered in a console collection (`agents`, `tools`, `workflows`).
    pub fn console_ids(&self, collection: &str) -> Vec<String> {
        self.with_state(|s| {
            s.console
                .get(collection)
                .map(|c| c.keys().cloned().collect())
                .unwrap_or_default()
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl Transport for MemoryStore {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = reqwest::Url::parse(&request.url).map_err(|e| ClientError::Http(e.to_string()))?;
        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(str::to_string).collect())
            .unwrap_or_default();
        let segs: Vec<&str> = segments.iter().map(String::as_str).collect();
        let body = match &request.body {
            RequestBody::Json(v) => Some(v.clone()),
            _ => None,
        };

        Ok(self.with_state(|state| match (request.method, segs.as_slice()) {
            (m, ["internal", "elastic_assistant", rest @ ..]) => {
                state.console_route(m, rest, body)
            }
            (HttpMethod::Put, ["_index_template", name]) => {
                state.templates.insert(name.to_string(), body.unwrap_or_default());
                reply(200, json!({"acknowledged": true}))
            }
            (HttpMethod::Delete, ["_index_template", name]) => {
                if state.templates.remove(*name).is_some() {
                    reply(200, json!({"acknowledged": true}))
                } else {
                    error(404, "index_template_missing_exception", name)
                }
            }
            (HttpMethod::Put, ["_data_stream", name]) => state.create_data_stream(name),
            (HttpMethod::Delete, ["_data_stream", name]) => {
                if state.data_streams.remove(*name) {
                    state.indices.remove(*name);
                    reply(200, json!({"acknowledged": true}))
                } else {
                    error(404, "index_not_found_exception", name)
                }
            }
            (HttpMethod::Post, ["_bulk"]) => match &request.body {
                RequestBody::NdJson(text) => state.bulk(text),
                _ => error(400, "parse_exception", "bulk body must be ndjson"),
            },
            (HttpMethod::Post, ["_query"]) => reply(200, json!({"columns": [], "values": []})),
            (HttpMethod::Post, [index, "_refresh"]) => {
                if state.indices.contains_key(*index) {
                    reply(200, json!({"_shards": {"failed": 0}}))
                } else {
                    error(404, "index_not_found_exception", index)
                }
            }
            (HttpMethod::Post, [index, "_search"]) => match state.indices.get(*index) {
                Some(docs) => {
                    let hits: Vec<Value> = docs
                        .iter()
                        .map(|(id, src)| json!({"_id": id, "_source": src}))
                        .collect();
                    reply(200, json!({"hits": {"total": {"value": hits.len()}, "hits": hits}}))
                }
                None => error(404, "index_not_found_exception", index),
            },
            (HttpMethod::Put, [index, "_doc", id]) => {
                let doc = body.unwrap_or_default();
                state.write(index, Some(id.to_string()), doc, false)
            }
            (HttpMethod::Post, [index, "_doc"]) => {
                let doc = body.unwrap_or_default();
                state.write(index, None, doc, false)
            }
            (HttpMethod::Put, [index]) => {
                if state.indices.contains_key(*index) {
                    error(
                        400,
                        "resource_already_exists_exception",
                        &format!("index [{index}] already exists"),
                    )
                } else {
                    state.indices.insert(index.to_string(), BTreeMap::new());
                    reply(200, json!({"acknowledged": true, "index": index}))
                }
            }
            (HttpMethod::Delete, [index]) => {
                if state.data_streams.contains(*index) {
                    error(400, "illegal_argument_exception", "use the data stream API")
                } else if state.indices.remove(*index).is_some() {
                    reply(200, json!({"acknowledged": true}))
                } else {
                    error(404, "index_not_found_exception", index)
                }
            }
            _ => error(400, "unsupported", request.url.as_str()),
        }))
    }
}

impl State {
    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("auto-{}", self.next_id)
    }

    fn create_data_stream(&mut self, name: &str) -> ApiResponse {
        if self.data_streams.contains(name) {
            return error(
                400,
                "resource_already_exists_exception",
                &format!("data_stream [{name}] already exists"),
            );
        }
        let matched = self.templates.values().any(|t| {
            t["index_patterns"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .any(|p| name.starts_with(p.trim_end_matches('*')))
        });
        if !matched {
            return error(400, "illegal_argument_exception", "no matching index template");
        }
        self.data_streams.insert(name.to_string());
        self.indices.insert(name.to_string(), BTreeMap::new());
        reply(200, json!({"acknowledged": true}))
    }

    /// Single write. `create_only` rejects an existing id with 409.
    fn write(
        &mut self,
        index: &str,
        id: Option<String>,
        doc: Value,
        create_only: bool,
    ) -> ApiResponse {
        let is_stream = self.data_streams.contains(index);
        if is_stream && !create_only {
            return error(
                400,
                "illegal_argument_exception",
                "only write ops with an op_type of create are allowed in data streams",
            );
        }
        let id = match (is_stream, id) {
            (true, _) => TSDS_DIMENSIONS
                .iter()
                .chain(["@timestamp"].iter())
                .map(|f| doc[*f].as_str().unwrap_or_default().to_string())
                .collect::<Vec<_>>()
                .join("|"),
            (false, Some(id)) => id,
            (false, None) => self.fresh_id(),
        };
        let docs = self.indices.entry(index.to_string()).or_default();
        if create_only && docs.contains_key(&id) {
            return error(
                409,
                "version_conflict_engine_exception",
                &format!("[{id}]: version conflict, document already exists"),
            );
        }
        let result = if docs.insert(id.clone(), doc).is_some() {
            "updated"
        } else {
            "created"
        };
        reply(201, json!({"_id": id, "result": result}))
    }

    fn bulk(&mut self, text: &str) -> ApiResponse {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let mut items = Vec::new();
        let mut errors = false;
        for pair in lines.chunks(2) {
            let (Some(action), Some(source)) = (pair.first(), pair.get(1)) else {
                return error(400, "parse_exception", "dangling action line");
            };
            let (Ok(action), Ok(doc)) = (
                serde_json::from_str::<Value>(action),
                serde_json::from_str::<Value>(source),
            ) else {
                return error(400, "parse_exception", "malformed ndjson");
            };
            let Some((op, meta)) = action.as_object().and_then(|o| o.iter().next()) else {
                return error(400, "parse_exception", "empty action");
            };
            let index = meta["_index"].as_str().unwrap_or_default().to_string();
            let id = meta["_id"].as_str().map(str::to_string);
            let response = self.write(&index, id, doc, op == "create");
            let parsed: Value = serde_json::from_str(&response.body).unwrap_or_default();
            let mut item = json!({"status": response.status, "_index": index});
            if response.is_success() {
                item["_id"] = parsed["_id"].clone();
            } else {
                errors = true;
                item["error"] = parsed["error"].clone();
            }
            items.push(json!({ op.as_str(): item }));
        }
        reply(200, json!({"took": 1, "errors": errors, "items": items}))
    }

    fn console_route(
        &mut self,
        method: HttpMethod,
        rest: &[&str],
        body: Option<Value>,
    ) -> ApiResponse {
        match (method, rest) {
            (HttpMethod::Post, [collection]) => {
                let body = body.unwrap_or_default();
                let id = ["id", "agent_id", "name"]
                    .iter()
                    .find_map(|k| body[*k].as_str())
                    .map(str::to_string);
                let id = match id {
                    Some(id) => id,
                    None => self.fresh_id(),
                };
                let entries = self.console.entry(collection.to_string()).or_default();
                if entries.contains_key(&id) {
                    return error(409, "conflict", &format!("{id} already exists"));
                }
                entries.insert(id.clone(), body);
                reply(200, json!({"id": id}))
            }
            (HttpMethod::Get, ["agents"]) => {
                let results: Vec<Value> = self
                    .console
                    .get("agents")
                    .map(|agents| {
                        agents
                            .iter()
                            .map(|(id, def)| {
                                // Echo the stored definition, as the console does
                                let mut entry = def.clone();
                                entry["id"] = json!(id);
                                entry
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                reply(200, json!({"results": results}))
            }
            (HttpMethod::Post, ["agents", id, "converse"]) => {
                let known = self.console.get("agents").is_some_and(|a| a.contains_key(*id));
                if !known {
                    return error(404, "not_found", id);
                }
                let message = body
                    .as_ref()
                    .and_then(|b| b["message"].as_str())
                    .unwrap_or_default()
                    .to_string();
                reply(200, json!({"message": format!("[{id}] {message}")}))
            }
            (HttpMethod::Delete, [collection, id]) => {
                let removed = self
                    .console
                    .get_mut(*collection)
                    .and_then(|c| c.remove(*id))
                    .is_some();
                if removed {
                    reply(200, json!({"deleted": true}))
                } else {
                    error(404, "not_found", id)
                }
            }
            _ => error(400, "unsupported", "console route"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::search::tests::test_settings;
    use crate::client::{Outcome, SearchClient, WriteMode};
    use crate::models::Document;
    use serde::Serialize;
    use std::sync::Arc;

    #[derive(Serialize)]
    struct Point {
        #[serde(rename = "@timestamp")]
        ts: &'static str,
        patient_id: &'static str,
        ward: &'static str,
    }

    impl Document for Point {}

    fn setup() -> (SearchClient, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SearchClient::new(&test_settings(), store.clone()), store)
    }

    #[test]
    fn data_stream_needs_template() {
        let (client, store) = setup();
        assert!(client.create_data_stream("metrics-x").is_err());
        client
            .put_index_template("t", &json!({"index_patterns": ["metrics-x*"]}))
            .unwrap();
        assert!(client.create_data_stream("metrics-x").unwrap().is_applied());
        assert!(store.is_data_stream("metrics-x"));
        assert_eq!(
            client.create_data_stream("metrics-x").unwrap(),
            Outcome::AlreadyExists
        );
    }

    #[test]
    fn tsds_rejects_duplicate_dimensions_and_timestamp() {
        let (client, store) = setup();
        client
            .put_index_template("t", &json!({"index_patterns": ["metrics-x*"]}))
            .unwrap();
        client.create_data_stream("metrics-x").unwrap();
        let points = [Point {
            ts: "2026-01-01T00:00:00Z",
            patient_id: "PAT-001",
            ward: "ICU",
        }];
        client.bulk("metrics-x", &points, WriteMode::Create).unwrap();
        assert_eq!(store.doc_count("metrics-x"), 1);
        assert!(client.bulk("metrics-x", &points, WriteMode::Create).is_err());
        assert!(client.bulk("metrics-x", &points, WriteMode::Index).is_err());
        assert_eq!(store.doc_count("metrics-x"), 1);
    }
}
