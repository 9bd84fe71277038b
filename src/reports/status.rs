use std::path::PathBuf;

use serde::Serialize;

use super::{ScanFailure, partition, scan_selection};
use crate::audit::highest_risk;
use crate::error::WorkspaceError;
use crate::lifecycle::{LifecycleManager, VaultRecord};
use crate::outcome::Outcome;

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub workspace: PathBuf,
    /// A policy file exists and parses; a malformed one falls back to the default.
    pub policy_in_force: bool,
    pub active: usize,
    /// Active skills with a HIGH or CRITICAL category.
    pub risky: Vec<String>,
    pub quarantined: Vec<String>,
    pub revoked: Vec<VaultRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScanFailure>,
}

impl StatusReport {
    pub fn outcome(&self) -> Outcome {
        if self.risky.is_empty() && self.failures.is_empty() {
            Outcome::Clean
        } else {
            Outcome::Attention
        }
    }
}

pub async fn status(manager: &LifecycleManager) -> Result<StatusReport, WorkspaceError> {
    let (scanned, failures) = partition(scan_selection(manager, None).await?);
    let active = scanned.len() + failures.len();
    let risky = scanned
        .into_iter()
        .filter(|(_, profile)| highest_risk(profile).is_elevated())
        .map(|(skill, _)| skill.name)
        .collect();

    Ok(StatusReport {
        workspace: manager.workspace().root().to_path_buf(),
        policy_in_force: manager.policy_store().load().is_some(),
        active,
        risky,
        quarantined: manager
            .quarantined_skills()
            .into_iter()
            .map(|skill| skill.name)
            .collect(),
        revoked: manager.vault().records(),
        failures,
    })
}
