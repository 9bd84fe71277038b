//! Read-only views over a workspace: audit, permission matrix, status,
//! enforcement preview and the policy document. Nothing here moves a skill.

use serde::Serialize;

use crate::audit::{PermissionProfile, scan_skills};
use crate::error::{ScanError, WorkspaceError};
use crate::lifecycle::LifecycleManager;
use crate::skills::{self, Skill};

mod audit;
mod enforce;
mod matrix;
mod policy;
mod status;

pub use audit::{AuditReport, SkillAudit, audit};
pub use enforce::{EnforceEntry, EnforceReport, PolicySource, enforce};
pub use matrix::{MatrixRow, PermissionMatrix, permission_matrix};
pub use policy::{PolicyView, init_policy, show_policy};
pub use status::{StatusReport, status};

/// A skill whose scan could not complete.
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub skill: String,
    pub error: String,
}

type Scanned = Vec<(Skill, Result<PermissionProfile, ScanError>)>;

/// Scan one named active skill, or every active skill when `name` is `None`.
async fn scan_selection(
    manager: &LifecycleManager,
    name: Option<&str>,
) -> Result<Scanned, WorkspaceError> {
    let selected = match name {
        Some(name) => vec![
            skills::find_active(manager.workspace(), name)
                .ok_or_else(|| WorkspaceError::UnknownSkill(name.to_string()))?,
        ],
        None => manager.active_skills(),
    };

    Ok(scan_skills(
        manager.scanner(),
        selected,
        manager.workspace().root(),
        manager.scan_concurrency(),
    )
    .await)
}

/// Split scan results into successes and failures, keeping order.
fn partition(scanned: Scanned) -> (Vec<(Skill, PermissionProfile)>, Vec<ScanFailure>) {
    let mut ok = Vec::new();
    let mut failed = Vec::new();
    for (skill, result) in scanned {
        match result {
            Ok(profile) => ok.push((skill, profile)),
            Err(err) => {
                tracing::warn!(skill = %skill.name, "scan failed: {err}");
                failed.push(ScanFailure {
                    skill: skill.name,
                    error: err.to_string(),
                });
            }
        }
    }
    (ok, failed)
}
