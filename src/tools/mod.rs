//! Custom tool definitions registered alongside the agents: parameterized
//! ES|QL queries and wrappers around YAML workflows.

pub mod esql;
pub mod workflow;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid workflow definition {file}: {source}")]
    InvalidWorkflow {
        file: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("No embedded workflow named {0}")]
    UnknownWorkflow(&'static str),

    #[error("Tool {tool}: {detail}")]
    ParameterMismatch { tool: &'static str, detail: String },
}

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
}

impl ToolParameter {
    pub const fn required(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            param_type,
            description,
            required: true,
        }
    }

    pub const fn optional(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            param_type,
            description,
            required: false,
        }
    }
}

/// What the tool executes. Serializes as the `type` tag plus the
/// `configuration` object the console expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "configuration", rename_all = "lowercase")]
pub enum ToolKind {
    Esql { query: String },
    Workflow { workflow: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub kind: ToolKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ToolKind::Esql { .. } => "esql",
            ToolKind::Workflow { .. } => "workflow",
        }
    }

    pub fn parameter_names(&self) -> BTreeSet<&'static str> {
        self.parameters.iter().map(|p| p.name).collect()
    }

    /// Body for the console's create-tool call.
    pub fn registration_payload(&self) -> Result<Value, serde_json::Error> {
        let mut payload = serde_json::to_value(self)?;
        payload["id"] = Value::String(self.name.to_string());
        Ok(payload)
    }
}

// ═══════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════

static QUERY_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?([a-z_][a-z0-9_]*)").unwrap());

/// Placeholder names (`?name`) used by an ES|QL query.
pub fn query_placeholders(query: &str) -> BTreeSet<&str> {
    QUERY_PARAM
        .captures_iter(query)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Check that a tool's declared parameters line up with what it consumes:
/// every ES|QL placeholder is declared and every declared parameter is
/// used; every required workflow input is declared.
pub fn validate(tool: &ToolDefinition) -> Result<(), ToolError> {
    let declared = tool.parameter_names();
    match &tool.kind {
        ToolKind::Esql { query } => {
            let used = query_placeholders(query);
            if let Some(missing) = used.iter().find(|u| !declared.iter().any(|d| d == *u)) {
                return Err(ToolError::ParameterMismatch {
                    tool: tool.name,
                    detail: format!("query uses undeclared parameter ?{missing}"),
                });
            }
            if let Some(unused) = declared.iter().find(|d| !used.iter().any(|u| u == *d)) {
                return Err(ToolError::ParameterMismatch {
                    tool: tool.name,
                    detail: format!("parameter {unused} is never used by the query"),
                });
            }
        }
        ToolKind::Workflow { workflow } => {
            for input in workflow::required_inputs(workflow) {
                if !declared.iter().any(|d| *d == input) {
                    return Err(ToolError::ParameterMismatch {
                        tool: tool.name,
                        detail: format!("workflow input {input} is not a tool parameter"),
                    });
                }
            }
        }
    }
    Ok(())
}

/// All 17 custom tools, ES|QL first, each checked with [`validate`].
pub fn all_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    let mut tools = esql::all_tools();
    tools.extend(workflow::all_tools()?);
    for tool in &tools {
        validate(tool)?;
    }
    Ok(tools)
}
