use serde::Serialize;

use super::{ScanFailure, partition, scan_selection};
use crate::audit::{PermissionProfile, RiskLevel, highest_risk};
use crate::error::WorkspaceError;
use crate::lifecycle::LifecycleManager;
use crate::outcome::Outcome;
use crate::skills::SkillMetadata;

#[derive(Debug, Clone, Serialize)]
pub struct SkillAudit {
    pub skill: String,
    pub metadata: SkillMetadata,
    pub risk: RiskLevel,
    pub total_findings: usize,
    pub permissions: PermissionProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub skills: Vec<SkillAudit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScanFailure>,
}

impl AuditReport {
    /// Blocking on any CRITICAL skill, Attention on HIGH or a failed scan.
    pub fn outcome(&self) -> Outcome {
        let worst = self
            .skills
            .iter()
            .map(|s| s.risk)
            .max()
            .unwrap_or(RiskLevel::Clean);
        match worst {
            RiskLevel::Critical => Outcome::Blocking,
            RiskLevel::High => Outcome::Attention,
            _ if !self.failures.is_empty() => Outcome::Attention,
            _ => Outcome::Clean,
        }
    }
}

/// Full findings for one active skill, or for all of them.
pub async fn audit(
    manager: &LifecycleManager,
    name: Option<&str>,
) -> Result<AuditReport, WorkspaceError> {
    let (scanned, failures) = partition(scan_selection(manager, name).await?);
    let skills = scanned
        .into_iter()
        .map(|(skill, permissions)| SkillAudit {
            risk: highest_risk(&permissions),
            total_findings: permissions.total(),
            skill: skill.name,
            metadata: skill.metadata,
            permissions,
        })
        .collect();
    Ok(AuditReport { skills, failures })
}
