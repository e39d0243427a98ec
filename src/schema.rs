//! Index template and mappings for the five collections, plus the ordered
//! create-all / delete-all sequences.

use serde_json::{json, Map, Value};

use crate::client::{ClientError, Outcome, SearchClient};
use crate::config::{
    INDEX_CAPACITY, INDEX_DECISIONS, INDEX_DISCHARGE, INDEX_PATIENTS, INDEX_VITALS, VITALS_TEMPLATE,
};

// ═══════════════════════════════════════════════════════════
// Mappings
// ═══════════════════════════════════════════════════════════

/// Time-series template behind the vitals data stream.
pub fn vitals_index_template() -> Value {
    let mut properties = Map::new();
    properties.insert("@timestamp".into(), json!({"type": "date"}));
    for dimension in ["patient_id", "ward"] {
        properties.insert(
            dimension.into(),
            json!({"type": "keyword", "time_series_dimension": true}),
        );
    }
    for gauge in [
        "heart_rate",
        "systolic_bp",
        "diastolic_bp",
        "oxygen_saturation",
        "temperature",
        "respiratory_rate",
    ] {
        properties.insert(
            gauge.into(),
            json!({"type": "float", "time_series_metric": "gauge"}),
        );
    }
    properties.insert(
        "pain_score".into(),
        json!({"type": "integer", "time_series_metric": "gauge"}),
    );

    json!({
        "index_patterns": [format!("{INDEX_VITALS}*")],
        "data_stream": {},
        "priority": 500,
        "template": {
            "settings": {
                "index.mode": "time_series",
                "index.routing_path": ["patient_id", "ward"],
                "index.look_back_time": "72h"
            },
            "mappings": { "properties": properties }
        }
    })
}

fn text_with_keyword() -> Value {
    json!({"type": "text", "fields": {"keyword": {"type": "keyword"}}})
}

pub fn patients_index() -> Value {
    json!({
        "mappings": {
            "properties": {
                "patient_id": {"type": "keyword"},
                "name": text_with_keyword(),
                "age": {"type": "integer"},
                "diagnosis": text_with_keyword(),
                "severity": {"type": "keyword"},
                "ward": {"type": "keyword"},
                "admitted_at": {"type": "date"},
                "comorbidities": {"type": "keyword"},
                "status": {"type": "keyword"},
                "attending_physician": {"type": "keyword"},
                "notes": {"type": "text"}
            }
        }
    })
}

pub fn capacity_index() -> Value {
    json!({
        "mappings": {
            "properties": {
                "ward": {"type": "keyword"},
                "ward_name": text_with_keyword(),
                "total_beds": {"type": "integer"},
                "occupied_beds": {"type": "integer"},
                "available_beds": {"type": "integer"},
                "occupancy_rate": {"type": "float"},
                "ventilators_total": {"type": "integer"},
                "ventilators_in_use": {"type": "integer"},
                "nurses_on_duty": {"type": "integer"},
                "doctors_on_duty": {"type": "integer"},
                "staffing_ratio": {"type": "float"},
                "updated_at": {"type": "date"}
            }
        }
    })
}

/// Audit log. `metadata` is stored but not indexed.
pub fn decisions_index() -> Value {
    json!({
        "mappings": {
            "properties": {
                "timestamp": {"type": "date"},
                "agent_name": {"type": "keyword"},
                "patient_id": {"type": "keyword"},
                "decision_type": {"type": "keyword"},
                "action": {"type": "keyword"},
                "reasoning": {"type": "text"},
                "confidence": {"type": "float"},
                "risk_level": {"type": "keyword"},
                "requires_review": {"type": "boolean"},
                "metadata": {"type": "object", "enabled": false}
            }
        }
    })
}

pub fn discharge_index() -> Value {
    let mut properties = Map::new();
    for (field, kind) in [
        ("patient_id", "keyword"),
        ("created_at", "date"),
        ("updated_at", "date"),
        ("status", "keyword"),
        ("target_discharge_date", "date"),
        ("vitals_stable", "boolean"),
        ("no_fever_24h", "boolean"),
        ("pain_controlled", "boolean"),
        ("mobility_adequate", "boolean"),
        ("oral_medication_tolerated", "boolean"),
        ("follow_up_scheduled", "boolean"),
        ("patient_educated", "boolean"),
        ("criteria_met_count", "integer"),
        ("criteria_total", "integer"),
        ("discharge_notes", "text"),
        ("approved_by", "keyword"),
    ] {
        properties.insert(field.into(), json!({"type": kind}));
    }
    json!({ "mappings": { "properties": properties } })
}

/// Regular indices in creation order, with their bodies.
pub fn regular_indices() -> [(&'static str, Value); 4] {
    [
        (INDEX_PATIENTS, patients_index()),
        (INDEX_CAPACITY, capacity_index()),
        (INDEX_DECISIONS, decisions_index()),
        (INDEX_DISCHARGE, discharge_index()),
    ]
}

// ═══════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════

/// Result of one lifecycle step, for progress output.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub resource: String,
    pub outcome: Outcome,
}

impl StepResult {
    fn new(resource: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            resource: resource.into(),
            outcome,
        }
    }
}

/// Template, then data stream, then the four regular indices.
///
/// Stops at the first failure; "already exists" counts as success, so a
/// second run is harmless.
pub fn create_all_indices(client: &SearchClient) -> Result<Vec<StepResult>, ClientError> {
    let mut steps = Vec::new();

    tracing::info!(template = VITALS_TEMPLATE, "Creating time-series template");
    let ack = client.put_index_template(VITALS_TEMPLATE, &vitals_index_template())?;
    steps.push(StepResult::new(
        format!("index template {VITALS_TEMPLATE}"),
        Outcome::Applied(ack),
    ));

    tracing::info!(stream = INDEX_VITALS, "Creating data stream");
    let outcome = client.create_data_stream(INDEX_VITALS)?;
    steps.push(StepResult::new(format!("data stream {INDEX_VITALS}"), outcome));

    for (name, body) in regular_indices() {
        tracing::info!(index = name, "Creating index");
        let outcome = client.create_index(name, &body)?;
        steps.push(StepResult::new(format!("index {name}"), outcome));
    }

    Ok(steps)
}

/// Data stream, then template, then the four regular indices.
///
/// Missing resources count as success; any other failure is returned.
pub fn delete_all_indices(client: &SearchClient) -> Result<Vec<StepResult>, ClientError> {
    let mut steps = Vec::new();

    tracing::info!(stream = INDEX_VITALS, "Deleting data stream");
    let outcome = client.delete_data_stream(INDEX_VITALS)?;
    steps.push(StepResult::new(format!("data stream {INDEX_VITALS}"), outcome));

    tracing::info!(template = VITALS_TEMPLATE, "Deleting index template");
    let outcome = client.delete_index_template(VITALS_TEMPLATE)?;
    steps.push(StepResult::new(format!("index template {VITALS_TEMPLATE}"), outcome));

    for (name, _) in regular_indices() {
        tracing::info!(index = name, "Deleting index");
        let outcome = client.delete_index(name)?;
        steps.push(StepResult::new(format!("index {name}"), outcome));
    }

    Ok(steps)
}
