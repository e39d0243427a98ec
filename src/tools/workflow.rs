//! Workflow tools. Each wraps a YAML workflow shipped under `workflows/`
//! and embedded at compile time.

use serde_json::Value;

use super::ParamType::{Boolean, Number, String as Text};
use super::{ToolDefinition, ToolError, ToolKind, ToolParameter};

pub const WORKFLOW_TOOL_NAMES: [&str; 4] = [
    "log_decision",
    "raise_critical_alert",
    "update_discharge",
    "update_ward_capacity",
];

/// Embedded workflow sources as `(file name, YAML text)`.
pub const WORKFLOW_SOURCES: [(&str, &str); 4] = [
    (
        "log_agent_decision.yaml",
        include_str!("../../workflows/log_agent_decision.yaml"),
    ),
    (
        "critical_alert.yaml",
        include_str!("../../workflows/critical_alert.yaml"),
    ),
    (
        "update_discharge_status.yaml",
        include_str!("../../workflows/update_discharge_status.yaml"),
    ),
    (
        "update_capacity.yaml",
        include_str!("../../workflows/update_capacity.yaml"),
    ),
];

/// Parse one embedded workflow into JSON for the console payload.
pub fn load_workflow(file: &'static str) -> Result<Value, ToolError> {
    let text = WORKFLOW_SOURCES
        .iter()
        .find(|(name, _)| *name == file)
        .map(|(_, text)| *text)
        .ok_or(ToolError::UnknownWorkflow(file))?;
    serde_yaml::from_str(text).map_err(|source| ToolError::InvalidWorkflow { file, source })
}

/// Every embedded workflow, parsed, in file order.
pub fn all_workflows() -> Result<Vec<(&'static str, Value)>, ToolError> {
    WORKFLOW_SOURCES
        .iter()
        .map(|(file, _)| load_workflow(file).map(|wf| (*file, wf)))
        .collect()
}

/// Names of the workflow's inputs marked `required: true`.
pub(crate) fn required_inputs(workflow: &Value) -> Vec<String> {
    workflow
        .get("inputs")
        .and_then(Value::as_array)
        .map(|inputs| {
            inputs
                .iter()
                .filter(|i| i.get("required").and_then(Value::as_bool).unwrap_or(false))
                .filter_map(|i| i.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn workflow_tool(
    name: &'static str,
    description: &'static str,
    file: &'static str,
    parameters: Vec<ToolParameter>,
) -> Result<ToolDefinition, ToolError> {
    Ok(ToolDefinition {
        name,
        description,
        kind: ToolKind::Workflow {
            workflow: load_workflow(file)?,
        },
        parameters,
    })
}

pub fn log_decision() -> Result<ToolDefinition, ToolError> {
    workflow_tool(
        "log_decision",
        "Log an agent decision to the agent-decisions audit index. Every significant decision \
         made by any agent should be logged for traceability and compliance. Records the agent \
         name, patient ID, decision type, reasoning, and confidence score.",
        "log_agent_decision.yaml",
        vec![
            ToolParameter::required("agent_name", Text, "Agent making the decision"),
            ToolParameter::required("patient_id", Text, "Patient ID"),
            ToolParameter::required(
                "decision_type",
                Text,
                "Type: triage, recovery_assessment, capacity_check, discharge_evaluation, safety_alert",
            ),
            ToolParameter::required("action", Text, "Action taken or recommended"),
            ToolParameter::required("reasoning", Text, "Detailed reasoning"),
            ToolParameter::required("confidence", Number, "Confidence 0.0-1.0"),
            ToolParameter::optional("risk_level", Text, "Risk: low, moderate, high, critical"),
            ToolParameter::optional("requires_review", Boolean, "Needs human review?"),
        ],
    )
}

/// Always recorded with `risk_level = critical` and `requires_review = true`.
pub fn raise_critical_alert() -> Result<ToolDefinition, ToolError> {
    workflow_tool(
        "raise_critical_alert",
        "SAFETY-CRITICAL: Raise an alert requiring immediate human review. Used when an agent \
         detects a dangerous situation such as patient deterioration, unsafe discharge \
         conditions, or capacity emergencies. Always sets requires_review=true and \
         risk_level=critical.",
        "critical_alert.yaml",
        vec![
            ToolParameter::required("agent_name", Text, "Agent raising the alert"),
            ToolParameter::required("patient_id", Text, "Patient ID"),
            ToolParameter::required(
                "alert_type",
                Text,
                "Alert type: deterioration_detected, safety_veto, critical_vitals, capacity_emergency",
            ),
            ToolParameter::required("reasoning", Text, "Why this alert was raised"),
            ToolParameter::required("recommended_action", Text, "What should be done immediately"),
            ToolParameter::required("confidence", Number, "Confidence 0.0-1.0"),
        ],
    )
}

pub fn update_discharge() -> Result<ToolDefinition, ToolError> {
    workflow_tool(
        "update_discharge",
        "Create or update a discharge plan for a patient with a 7-point criteria assessment. \
         Evaluates: vitals stability, fever-free status, pain control, mobility, oral \
         medication tolerance, follow-up scheduling, and patient education.",
        "update_discharge_status.yaml",
        vec![
            ToolParameter::required("patient_id", Text, "Patient ID"),
            ToolParameter::required(
                "status",
                Text,
                "Status: pending, approved, discharged, deferred",
            ),
            ToolParameter::required("vitals_stable", Boolean, "Vitals stable 24+ hours?"),
            ToolParameter::required("no_fever_24h", Boolean, "No fever in 24h?"),
            ToolParameter::required("pain_controlled", Boolean, "Pain score < 4?"),
            ToolParameter::required("mobility_adequate", Boolean, "Can mobilize for home care?"),
            ToolParameter::required("oral_medication_tolerated", Boolean, "Tolerating oral meds?"),
            ToolParameter::required("follow_up_scheduled", Boolean, "Follow-up scheduled?"),
            ToolParameter::required("patient_educated", Boolean, "Patient educated?"),
            ToolParameter::optional("target_discharge_date", Text, "Target date (ISO format)"),
            ToolParameter::optional("discharge_notes", Text, "Additional notes"),
        ],
    )
}

pub fn update_ward_capacity() -> Result<ToolDefinition, ToolError> {
    workflow_tool(
        "update_ward_capacity",
        "Update ward bed capacity when a patient is admitted, transferred, or discharged. \
         Automatically recalculates available beds and occupancy rate.",
        "update_capacity.yaml",
        vec![
            ToolParameter::required("ward", Text, "Ward name (e.g., ICU, surgical)"),
            ToolParameter::required("occupied_beds", Number, "New occupied bed count"),
            ToolParameter::required("total_beds", Number, "Total beds in ward"),
            ToolParameter::optional("ventilators_in_use", Number, "Ventilators in use"),
            ToolParameter::optional("notes", Text, "Reason for update"),
        ],
    )
}

pub fn all_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![
        log_decision()?,
        raise_critical_alert()?,
        update_discharge()?,
        update_ward_capacity()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_workflows_parse() {
        let workflows = all_workflows().unwrap();
        assert_eq!(workflows.len(), 4);
        for (file, wf) in &workflows {
            assert!(wf["name"].is_string(), "{file}");
            assert!(wf["steps"].as_array().is_some_and(|s| !s.is_empty()), "{file}");
        }
    }

    #[test]
    fn names_match_tools() {
        let names: Vec<&str> = all_tools().unwrap().iter().map(|t| t.name).collect();
        assert_eq!(names, WORKFLOW_TOOL_NAMES);
    }

    #[test]
    fn workflow_inputs_match_parameters() {
        for tool in all_tools().unwrap() {
            let ToolKind::Workflow { workflow } = &tool.kind else {
                panic!("{} is not a workflow", tool.name);
            };
            let declared = tool.parameter_names();
            for input in required_inputs(workflow) {
                assert!(declared.iter().any(|d| *d == input), "{}: {input}", tool.name);
            }
        }
    }

    #[test]
    fn critical_alert_forces_review() {
        let wf = load_workflow("critical_alert.yaml").unwrap();
        let doc = &wf["steps"][0]["with"]["document"];
        assert_eq!(doc["risk_level"], "critical");
        assert_eq!(doc["requires_review"], true);
        assert_eq!(wf["steps"][0]["with"]["index"], "agent-decisions");
    }

    #[test]
    fn workflow_tool_serialized_shape() {
        let json = serde_json::to_value(update_ward_capacity().unwrap()).unwrap();
        assert_eq!(json["type"], "workflow");
        assert_eq!(json["configuration"]["workflow"]["name"], "update_capacity");
        assert_eq!(json["parameters"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn unknown_file_rejected() {
        assert!(matches!(
            load_workflow("missing.yaml"),
            Err(ToolError::UnknownWorkflow("missing.yaml"))
        ));
    }
}
