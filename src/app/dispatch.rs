use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::ArbiterConfig;
use crate::lifecycle::{LifecycleManager, QuarantineOutcome};
use crate::outcome::Outcome;
use crate::reports;

/// Assemble a manager for the resolved workspace.
pub fn build_manager(cli: &Cli, config: &ArbiterConfig) -> Result<LifecycleManager> {
    LifecycleManager::from_config(config, cli.workspace.as_deref())
        .context("Failed to open workspace")
}

/// Run one command and return its JSON report with the outcome.
pub async fn run(command: &Commands, manager: &mut LifecycleManager) -> Result<(Value, Outcome)> {
    match command {
        Commands::Audit { skill } => {
            let report = reports::audit(manager, skill.as_deref()).await?;
            reply(&report, report.outcome())
        }
        Commands::Report { skill } => {
            let matrix = reports::permission_matrix(manager, skill.as_deref()).await?;
            reply(&matrix, Outcome::Clean)
        }
        Commands::Status => {
            let report = reports::status(manager).await?;
            reply(&report, report.outcome())
        }
        Commands::Policy { init } => {
            let view = if *init {
                reports::init_policy(manager.policy_store())?
            } else {
                reports::show_policy(manager.policy_store())
            };
            reply(&view, view.outcome())
        }
        Commands::Enforce { skill } => {
            let report = reports::enforce(manager, skill.as_deref()).await?;
            reply(&report, report.outcome())
        }
        Commands::Quarantine { skill } => {
            let result = manager.quarantine(skill)?;
            if result == QuarantineOutcome::AlreadyQuarantined {
                debug!(skill = %skill, "already quarantined");
            }
            Ok((json!({ "skill": skill, "result": result }), Outcome::Clean))
        }
        Commands::Unquarantine { skill } => {
            manager.unquarantine(skill)?;
            Ok((
                json!({ "skill": skill, "result": "unquarantined" }),
                Outcome::Clean,
            ))
        }
        Commands::Revoke { skill } => {
            let revocation = manager.revoke(skill)?;
            reply(&revocation, Outcome::Clean)
        }
        Commands::Protect => {
            let report = manager.protect().await;
            reply(&report, report.outcome())
        }
    }
}

pub async fn dispatch(cli: Cli, config: ArbiterConfig) -> Result<Outcome> {
    let mut manager = build_manager(&cli, &config)?;
    let (report, outcome) = run(&cli.command, &mut manager).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report")?
    );
    Ok(outcome)
}

fn reply(report: &impl Serialize, outcome: Outcome) -> Result<(Value, Outcome)> {
    let value = serde_json::to_value(report).context("Failed to encode report")?;
    Ok((value, outcome))
}
