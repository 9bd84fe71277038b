use serde::Serialize;
use tracing::{info, warn};

use super::{LifecycleManager, QuarantineOutcome};
use crate::audit::{Category, PermissionProfile, RiskLevel, highest_risk, scan_skills};
use crate::outcome::Outcome;
use crate::policy::{Decision, decide};

/// What the sweep did to one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SweepAction {
    Quarantined,
    /// Denied, but a quarantined copy was already in place.
    AlreadyQuarantined,
    /// Advisory only; the skill stays active.
    Flagged { categories: Vec<Category> },
    Clean,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepEntry {
    pub skill: String,
    /// Absent when the scan failed.
    pub risk: Option<RiskLevel>,
    pub decision: Option<Decision>,
    #[serde(flatten)]
    pub action: SweepAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Whether a workspace policy file was loaded for this sweep.
    pub policy_in_force: bool,
    pub entries: Vec<SweepEntry>,
}

impl SweepReport {
    fn count(&self, pred: impl Fn(&SweepAction) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.action)).count()
    }

    pub fn audited(&self) -> usize {
        self.entries.len()
    }

    pub fn quarantined(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Quarantined))
    }

    pub fn flagged(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Flagged { .. }))
    }

    pub fn clean(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Clean))
    }

    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a, SweepAction::Failed { .. }))
    }

    /// Blocking when this sweep quarantined anything, Attention when it
    /// flagged or failed on a skill.
    pub fn outcome(&self) -> Outcome {
        if self.quarantined() > 0 {
            Outcome::Blocking
        } else if self.flagged() > 0 || self.failed() > 0 {
            Outcome::Attention
        } else {
            Outcome::Clean
        }
    }
}

impl LifecycleManager {
    /// Scan every active skill, decide it against the current policy and
    /// quarantine what is denied.
    ///
    /// Scans run concurrently; transitions are applied one at a time in skill
    /// name order. A failure on one skill is recorded and the sweep goes on.
    pub async fn protect(&mut self) -> SweepReport {
        let policy = self.policy_store.load();
        let skills = self.active_skills();
        info!(
            skills = skills.len(),
            policy = policy.is_some(),
            "starting protection sweep"
        );

        let scanned = scan_skills(
            &self.scanner,
            skills,
            self.workspace.root(),
            self.scan_concurrency,
        )
        .await;

        let mut entries = Vec::with_capacity(scanned.len());
        for (skill, scan) in scanned {
            let profile = match scan {
                Ok(profile) => profile,
                Err(err) => {
                    warn!(skill = %skill.name, "scan failed: {err}");
                    entries.push(SweepEntry {
                        skill: skill.name,
                        risk: None,
                        decision: None,
                        action: SweepAction::Failed {
                            error: err.to_string(),
                        },
                    });
                    continue;
                }
            };

            let risk = highest_risk(&profile);
            let decision = decide(&profile, policy.as_ref());
            let action = if decision.is_denied() {
                match self.quarantine(&skill.name) {
                    Ok(QuarantineOutcome::Quarantined) => SweepAction::Quarantined,
                    Ok(QuarantineOutcome::AlreadyQuarantined) => SweepAction::AlreadyQuarantined,
                    Err(err) => {
                        warn!(skill = %skill.name, "quarantine failed: {err}");
                        SweepAction::Failed {
                            error: err.to_string(),
                        }
                    }
                }
            } else if risk.is_elevated() {
                SweepAction::Flagged {
                    categories: elevated_categories(&profile),
                }
            } else {
                SweepAction::Clean
            };

            entries.push(SweepEntry {
                skill: skill.name,
                risk: Some(risk),
                decision: Some(decision),
                action,
            });
        }

        let report = SweepReport {
            policy_in_force: policy.is_some(),
            entries,
        };
        info!(
            quarantined = report.quarantined(),
            flagged = report.flagged(),
            failed = report.failed(),
            "protection sweep finished"
        );
        report
    }
}

fn elevated_categories(profile: &PermissionProfile) -> Vec<Category> {
    profile
        .categories()
        .filter(|c| RiskLevel::from(c.severity()).is_elevated())
        .collect()
}
