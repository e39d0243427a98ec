//! The runner's actions: setup, agent listing, teardown, console
//! registration and the demo. Human-facing progress goes to `out`;
//! diagnostics go through `tracing`.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::agents::{all_agents, AgentDefinition};
use crate::cli::Action;
use crate::client::{ClientError, ConsoleClient, Outcome, SearchClient};
use crate::config::{
    ConfigError, Settings, INDEX_CAPACITY, INDEX_DECISIONS, INDEX_DISCHARGE, INDEX_PATIENTS,
    INDEX_VITALS,
};
use crate::demo::{self, DemoSummary};
use crate::schema::{create_all_indices, delete_all_indices, StepResult};
use crate::seed::{seed_all, SeedReport};
use crate::tools::{self, ToolError};

const RULE: &str = "----------------------------------------------------------------------";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Run `actions` in order, building each client the first time it is
/// needed. Stops at the first error.
pub fn execute<W: Write>(
    actions: &[Action],
    settings: &Settings,
    out: &mut W,
) -> Result<(), CommandError> {
    let mut search: Option<SearchClient> = None;
    let mut console: Option<ConsoleClient> = None;

    for action in actions {
        tracing::debug!(?action, "Running action");
        match action {
            Action::Agents => do_agents(out)?,
            Action::Setup | Action::Teardown => {
                let client = match search.take() {
                    Some(c) => c,
                    None => SearchClient::from_settings(settings)?,
                };
                if *action == Action::Setup {
                    do_setup(&client, Utc::now(), out)?;
                } else {
                    do_teardown(&client, out)?;
                }
                search = Some(client);
            }
            Action::Register | Action::Demo => {
                let client = match console.take() {
                    Some(c) => c,
                    None => ConsoleClient::from_settings(settings)?,
                };
                if *action == Action::Register {
                    do_register(&client, settings.llm_connector_id.as_deref(), out)?;
                } else {
                    do_demo(&client, out)?;
                }
                console = Some(client);
            }
        }
    }
    Ok(())
}

fn print_steps<W: Write>(steps: &[StepResult], out: &mut W) -> io::Result<()> {
    for step in steps {
        writeln!(out, "  {:<28} {}", step.resource, step.outcome.note())?;
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Setup
// ═══════════════════════════════════════════════════════════

/// Create the indices, seed the dataset against `now`, then refresh the
/// seeded collections so they are searchable when this returns.
pub fn do_setup<W: Write>(
    client: &SearchClient,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<SeedReport, CommandError> {
    writeln!(out, "Pravaah Setup")?;
    writeln!(out, "Creating indices and seeding sample data.")?;

    writeln!(out, "\nStep 1/2: Creating indices...")?;
    let steps = create_all_indices(client)?;
    print_steps(&steps, out)?;
    writeln!(out, "  All indices created successfully.")?;

    writeln!(out, "\nStep 2/2: Seeding sample data...")?;
    let report = seed_all(client, now)?;
    writeln!(
        out,
        "  Data seeded: patients={} capacity={} vitals={}",
        report.patients, report.capacity, report.vitals
    )?;

    for index in [INDEX_PATIENTS, INDEX_CAPACITY, INDEX_VITALS] {
        client.refresh(index)?;
    }
    tracing::info!(?report, "Setup complete");

    writeln!(out, "\nData setup complete!")?;
    writeln!(out, "Indices created:")?;
    writeln!(out, "  - {INDEX_VITALS} (time series data stream, {} readings)", report.vitals)?;
    writeln!(out, "  - {INDEX_PATIENTS} ({} patient records)", report.patients)?;
    writeln!(out, "  - {INDEX_CAPACITY} ({} ward records)", report.capacity)?;
    writeln!(out, "  - {INDEX_DECISIONS} (audit log, empty)")?;
    writeln!(out, "  - {INDEX_DISCHARGE} (empty)")?;
    writeln!(out, "\nNext step: run `pravaah --agents` to print the agent configurations,")?;
    writeln!(out, "or `pravaah --register` to create them through the console API.")?;
    Ok(report)
}

// ═══════════════════════════════════════════════════════════
// Agents
// ═══════════════════════════════════════════════════════════

fn agent_row(index: usize, agent: &AgentDefinition) -> String {
    format!(
        "{:<3}{:<22}{:<28}{:<42}{} chars",
        index,
        agent.agent_id,
        agent.display_name,
        agent.short_tool_names().join(", "),
        agent.custom_instructions.len()
    )
}

/// Print every agent's configuration for manual entry in the Agent
/// Builder UI.
pub fn do_agents<W: Write>(out: &mut W) -> Result<(), CommandError> {
    let agents = all_agents();

    writeln!(out, "Pravaah Agent Configurations")?;
    writeln!(out, "Create each agent under Agent Builder > Agents > New Agent and fill in:")?;
    writeln!(out, "  1. Agent ID")?;
    writeln!(out, "  2. Custom Instructions (paste the full text)")?;
    writeln!(out, "  3. Display Name")?;
    writeln!(out, "  4. Enable the listed Tools (in the Tools tab)")?;

    writeln!(out, "\nAgent Summary")?;
    writeln!(
        out,
        "{:<3}{:<22}{:<28}{:<42}{}",
        "#", "Agent ID", "Display Name", "Tools to Enable", "Instructions"
    )?;
    for (i, agent) in agents.iter().enumerate() {
        writeln!(out, "{}", agent_row(i + 1, agent))?;
    }

    let total = agents.len();
    for (i, agent) in agents.iter().enumerate() {
        writeln!(out, "\n{}", "=".repeat(RULE.len()))?;
        writeln!(out, "Agent {}/{total}: {}", i + 1, agent.display_name)?;
        writeln!(out, "Agent ID: {}", agent.agent_id)?;
        writeln!(out, "Display Name: {}", agent.display_name)?;
        writeln!(out, "Display Description: {}", agent.display_description)?;
        writeln!(out, "Tools to enable (in Tools tab):")?;
        for tool in &agent.tools {
            writeln!(out, "  - {tool}")?;
        }
        writeln!(out, "\nCustom Instructions (copy everything between the lines):")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "{}", agent.custom_instructions)?;
        writeln!(out, "{RULE}")?;
    }

    writeln!(
        out,
        "\nAll agent configs printed. Save each agent, then use 'Save and chat' to try it."
    )?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Teardown
// ═══════════════════════════════════════════════════════════

pub fn do_teardown<W: Write>(client: &SearchClient, out: &mut W) -> Result<(), CommandError> {
    writeln!(out, "Pravaah Teardown")?;
    writeln!(out, "Deleting all indices.")?;
    let steps = delete_all_indices(client)?;
    print_steps(&steps, out)?;
    writeln!(out, "\nTeardown complete.")?;
    writeln!(out, "Note: agents created in the console are not deleted here.")?;
    writeln!(out, "  Agent Builder > Agents > select agent > Delete")?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Register
// ═══════════════════════════════════════════════════════════

/// Resources the console accepted versus ones it already had.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterReport {
    pub created: usize,
    pub existing: usize,
}

impl RegisterReport {
    fn record<W: Write>(
        &mut self,
        kind: &str,
        id: &str,
        outcome: &Outcome,
        out: &mut W,
    ) -> io::Result<()> {
        match outcome {
            Outcome::AlreadyExists => self.existing += 1,
            _ => self.created += 1,
        }
        writeln!(out, "  {kind:<9}{id:<28}{}", outcome.note())
    }
}

/// Push workflows, then tools, then agents to the console. Existing
/// resources are left as they are.
pub fn do_register<W: Write>(
    console: &ConsoleClient,
    connector_id: Option<&str>,
    out: &mut W,
) -> Result<RegisterReport, CommandError> {
    let mut report = RegisterReport::default();
    writeln!(out, "Registering Pravaah with the console")?;
    if connector_id.is_none() {
        tracing::warn!("LLM_CONNECTOR_ID not set; agents will use the console default connector");
    }

    for (file, workflow) in tools::workflow::all_workflows()? {
        let outcome = console.create_workflow(&workflow)?;
        report.record("workflow", file, &outcome, out)?;
    }

    for tool in tools::all_tools()? {
        let payload = tool.registration_payload().map_err(ClientError::from)?;
        let outcome = console.create_tool(&payload)?;
        report.record("tool", tool.name, &outcome, out)?;
    }

    for agent in all_agents() {
        let outcome = console.create_agent(&agent.registration_payload(connector_id))?;
        report.record("agent", agent.agent_id, &outcome, out)?;
    }

    tracing::info!(created = report.created, existing = report.existing, "Registration complete");
    writeln!(
        out,
        "\nRegistered: {} created, {} already present.",
        report.created, report.existing
    )?;
    Ok(report)
}

// ═══════════════════════════════════════════════════════════
// Demo
// ═══════════════════════════════════════════════════════════

pub fn do_demo<W: Write>(
    console: &ConsoleClient,
    out: &mut W,
) -> Result<DemoSummary, CommandError> {
    let agents = console.list_agents()?;
    tracing::info!(count = agents.len(), "Registered agents found");
    Ok(demo::run_all(console, &agents, out)?)
}
