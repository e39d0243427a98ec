//! Scripted demo conversations, one per agent specialty.
//!
//! Each scenario sends a fixed prompt to one registered agent through the
//! console's converse API. A scenario whose agent is not registered, or
//! whose call fails, is reported and counted as failed; the run continues.

use std::io::{self, Write};

use serde::Serialize;

use crate::client::{AgentSummary, ClientError, ConsoleClient, ConverseReply};

pub struct Scenario {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    /// Agent id, or display name, the prompt is sent to.
    pub agent: &'static str,
    pub message: &'static str,
}

pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: 1,
        title: "Emergency Triage - Acute MI (PAT-007)",
        description: "Amit Joshi, 55, arrived in the emergency department 4 hours ago with \
                      crushing chest pain. The Triage Agent assesses severity with MEWS scoring \
                      and recommends an immediate care pathway.",
        agent: "triage-agent",
        message: "Urgent triage needed for patient PAT-007. This is a 55-year-old male who \
                  presented to the emergency department approximately 4 hours ago with acute \
                  chest pain and suspected myocardial infarction. Please retrieve his vitals, \
                  calculate his MEWS score, assess severity, and recommend the appropriate care \
                  pathway and ward placement.",
    },
    Scenario {
        id: 2,
        title: "Recovery Analysis - Post-Appendectomy (PAT-002)",
        description: "Ananya Sharma, 34, is recovering from an appendectomy. The Recovery Agent \
                      analyzes her 48-hour vital sign trends to compute a recovery score and \
                      estimate time to discharge.",
        agent: "recovery-agent",
        message: "Please analyze the recovery trajectory for patient PAT-002. She is a \
                  34-year-old female recovering from a post-appendectomy in the surgical ward. \
                  Review her vital sign trends over the past 48 hours, compute her weighted \
                  recovery score, and provide a recovery status classification with estimated \
                  days to full recovery.",
    },
    Scenario {
        id: 3,
        title: "Guardian Catches Hidden Deterioration (PAT-008)",
        description: "Lakshmi Devi, 62, has severe asthma and appears stable. The Guardian \
                      Agent's 3-hour window comparison catches a subtle deterioration that \
                      routine monitoring would miss.",
        agent: "guardian-agent",
        message: "Run a safety assessment for patient PAT-008. She is a 62-year-old female \
                  with severe asthma in the respiratory ward. Compare her recent 3-hour vital \
                  sign window against her prior 3-hour window to check for any deterioration \
                  trends. Also run a hospital-wide critical patient scan to see if there are \
                  any other patients of concern.",
    },
    Scenario {
        id: 4,
        title: "Capacity Crisis - ICU Full",
        description: "The ICU is at 92% occupancy (11/12 beds) and a new critical patient needs \
                      admission. The Capacity Agent looks for a bed, transfer candidates, or \
                      overflow options.",
        agent: "capacity-agent",
        message: "We have a capacity situation. A new critical patient requires ICU admission \
                  but the ICU is nearly full. Please check the current capacity across all \
                  wards, evaluate ICU bed availability, review which ICU patients might be \
                  candidates for step-down transfer to free up beds, and recommend the best \
                  course of action. Consider patient PAT-004 (diabetic ketoacidosis, rapid \
                  recovery) as a potential transfer-out candidate.",
    },
    Scenario {
        id: 5,
        title: "Full Orchestrated Journey - PAT-002 Discharge",
        description: "The Pravaah Orchestrator runs all five phases for Ananya Sharma's \
                      discharge evaluation: triage review, recovery analysis, capacity impact, \
                      discharge checklist and safety clearance.",
        agent: "pravaah-orchestrator",
        message: "Run a complete patient journey assessment for PAT-002 (Ananya Sharma, 34, \
                  post-appendectomy, surgical ward). She has been recovering well and we need \
                  to evaluate her for potential discharge. Please execute all five phases:\n\n\
                  1. TRIAGE REVIEW: Verify current severity and vital signs\n\
                  2. RECOVERY ANALYSIS: Compute her recovery score and trajectory\n\
                  3. CAPACITY CHECK: Assess if her bed is needed urgently\n\
                  4. DISCHARGE EVALUATION: Run the 7-point discharge checklist\n\
                  5. SAFETY REVIEW: Guardian check for any hidden deterioration\n\n\
                  Provide a comprehensive summary with your final recommendation.",
    },
];

const PREVIEW_CHARS: usize = 100;

#[derive(Debug)]
pub enum ScenarioResult {
    Answered(ConverseReply),
    AgentMissing,
    Failed(ClientError),
}

impl ScenarioResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DemoSummary {
    pub run: usize,
    pub successful: usize,
    pub failed: usize,
}

impl DemoSummary {
    fn record(&mut self, result: &ScenarioResult) {
        self.run += 1;
        if result.is_success() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Registered id for `key`, matched against agent ids first and display
/// names second.
pub fn resolve_agent<'a>(agents: &'a [AgentSummary], key: &str) -> Option<&'a str> {
    agents
        .iter()
        .find(|a| a.id == key)
        .or_else(|| agents.iter().find(|a| a.is_named(key)))
        .map(|a| a.id.as_str())
}

pub fn run_scenario(
    console: &ConsoleClient,
    scenario: &Scenario,
    agents: &[AgentSummary],
) -> ScenarioResult {
    let Some(agent_id) = resolve_agent(agents, scenario.agent) else {
        tracing::warn!(agent = scenario.agent, scenario = scenario.id, "Agent not registered");
        return ScenarioResult::AgentMissing;
    };
    tracing::debug!(agent_id, scenario = scenario.id, "Sending scenario prompt");
    match console.converse(agent_id, scenario.message) {
        Ok(reply) => ScenarioResult::Answered(reply),
        Err(e) => {
            tracing::warn!(error = %e, scenario = scenario.id, "Scenario failed");
            ScenarioResult::Failed(e)
        }
    }
}

fn preview(message: &str) -> String {
    let head: String = message.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Run every scenario in order, printing progress to `out`.
pub fn run_all<W: Write>(
    console: &ConsoleClient,
    agents: &[AgentSummary],
    out: &mut W,
) -> io::Result<DemoSummary> {
    writeln!(out, "Pravaah Multi-Agent Patient Journey Demo")?;
    writeln!(out, "Running {} scenarios against the registered agents.", SCENARIOS.len())?;

    let mut summary = DemoSummary::default();
    for scenario in &SCENARIOS {
        writeln!(out)?;
        writeln!(out, "=== Scenario {}: {} ===", scenario.id, scenario.title)?;
        writeln!(out, "{}", scenario.description)?;

        let result = run_scenario(console, scenario, agents);
        match &result {
            ScenarioResult::Answered(reply) => {
                writeln!(out, "Message: {}", preview(scenario.message))?;
                writeln!(out, "--- Agent Response: {} ---", scenario.agent)?;
                writeln!(out, "{}", reply.text)?;
            }
            ScenarioResult::AgentMissing => {
                let available: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
                writeln!(out, "Agent '{}' not found in registered agents.", scenario.agent)?;
                writeln!(out, "Available agents: {}", available.join(", "))?;
            }
            ScenarioResult::Failed(e) => {
                writeln!(out, "Error running scenario: {e}")?;
            }
        }
        summary.record(&result);
    }

    writeln!(out)?;
    writeln!(out, "Demo Complete")?;
    writeln!(out, "Scenarios run: {}", summary.run)?;
    writeln!(out, "Successful: {}", summary.successful)?;
    writeln!(out, "Failed: {}", summary.failed)?;
    Ok(summary)
}
