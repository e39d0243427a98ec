//! Command-line flags. Flags combine; `--all` means setup then agents.

use clap::Parser;

const EXAMPLES: &str = "Examples:
  pravaah --setup      Create indices + seed data
  pravaah --agents     Print agent configs for the Agent Builder UI
  pravaah --teardown   Delete all indices
  pravaah --all        Setup + print agent configs
  pravaah --register   Register tools, workflows and agents with the console
  pravaah --demo       Run the five demo scenarios against registered agents";

#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "pravaah",
    version,
    about = "Pravaah: Multi-Agent Patient Journey Orchestrator",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Create indices and seed sample data
    #[arg(long)]
    pub setup: bool,

    /// Print agent configurations for the Agent Builder UI
    #[arg(long)]
    pub agents: bool,

    /// Delete all indices
    #[arg(long)]
    pub teardown: bool,

    /// Run setup + print agent configs
    #[arg(long)]
    pub all: bool,

    /// Register tools, workflows and agents with the console
    #[arg(long)]
    pub register: bool,

    /// Run the demo scenarios through the converse API
    #[arg(long)]
    pub demo: bool,
}

/// One unit of work, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Setup,
    Agents,
    Teardown,
    Register,
    Demo,
}

impl Args {
    pub fn is_empty(&self) -> bool {
        !(self.setup || self.agents || self.teardown || self.all || self.register || self.demo)
    }

    /// Actions to run. `--all` replaces `--setup`/`--agents`/`--teardown`;
    /// register and demo always follow.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.all {
            actions.extend([Action::Setup, Action::Agents]);
        } else {
            if self.setup {
                actions.push(Action::Setup);
            }
            if self.agents {
                actions.push(Action::Agents);
            }
            if self.teardown {
                actions.push(Action::Teardown);
            }
        }
        if self.register {
            actions.push(Action::Register);
        }
        if self.demo {
            actions.push(Action::Demo);
        }
        actions
    }
}
