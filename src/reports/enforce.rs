use serde::Serialize;

use super::{ScanFailure, partition, scan_selection};
use crate::audit::{RiskLevel, highest_risk};
use crate::error::WorkspaceError;
use crate::lifecycle::LifecycleManager;
use crate::outcome::Outcome;
use crate::policy::{Decision, Policy, decide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySource {
    Workspace,
    /// No readable policy file; the built-in default was applied.
    Default,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnforceEntry {
    pub skill: String,
    pub risk: RiskLevel,
    #[serde(flatten)]
    pub decision: Decision,
}

/// What the policy would do to each skill. Enforcement itself is `protect`.
#[derive(Debug, Clone, Serialize)]
pub struct EnforceReport {
    pub policy_source: PolicySource,
    pub policy: Policy,
    pub entries: Vec<EnforceEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScanFailure>,
}

impl EnforceReport {
    pub fn outcome(&self) -> Outcome {
        if self.entries.iter().any(|e| e.decision.is_denied()) {
            Outcome::Blocking
        } else if self.entries.iter().any(|e| e.decision.is_review()) || !self.failures.is_empty()
        {
            Outcome::Attention
        } else {
            Outcome::Clean
        }
    }
}

pub async fn enforce(
    manager: &LifecycleManager,
    name: Option<&str>,
) -> Result<EnforceReport, WorkspaceError> {
    let (policy_source, policy) = match manager.policy_store().load() {
        Some(policy) => (PolicySource::Workspace, policy),
        None => (PolicySource::Default, Policy::default()),
    };

    let (scanned, failures) = partition(scan_selection(manager, name).await?);
    let entries = scanned
        .into_iter()
        .map(|(skill, profile)| EnforceEntry {
            skill: skill.name,
            risk: highest_risk(&profile),
            decision: decide(&profile, Some(&policy)),
        })
        .collect();

    Ok(EnforceReport {
        policy_source,
        policy,
        entries,
        failures,
    })
}
