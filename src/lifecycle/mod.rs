//! Skill lifecycle: Active → Quarantined → Revoked.
//!
//! Status lives in directory placement only. Every transition is a rename,
//! copy or delete under the workspace, and all of them take `&mut self` so a
//! single manager never interleaves two moves.

use std::sync::Arc;

use crate::audit::{PatternCatalog, Scanner};
use crate::config::ArbiterConfig;
use crate::policy::PolicyStore;
use crate::skills::{self, Skill, SkillStatus};
use crate::workspace::{Workspace, resolve_workspace};

mod sweep;
mod transitions;
pub mod vault;

pub use sweep::{SweepAction, SweepEntry, SweepReport};
pub use transitions::{QuarantineOutcome, Revocation};
pub use vault::{Vault, VaultRecord};

pub const DEFAULT_SCAN_CONCURRENCY: usize = 4;

#[derive(Debug)]
pub struct LifecycleManager {
    workspace: Workspace,
    scanner: Scanner,
    policy_store: PolicyStore,
    vault: Vault,
    scan_concurrency: usize,
}

impl LifecycleManager {
    pub fn new(workspace: Workspace, scanner: Scanner) -> Self {
        let policy_store = PolicyStore::new(workspace.policy_path());
        let vault = Vault::new(workspace.vault_root());
        Self {
            workspace,
            scanner,
            policy_store,
            vault,
            scan_concurrency: DEFAULT_SCAN_CONCURRENCY,
        }
    }

    /// Resolve the workspace (`explicit` first, then the environment, the
    /// config and the current directory) and wire up a manager for it.
    pub fn from_config(config: &ArbiterConfig, explicit: Option<&str>) -> crate::Result<Self> {
        config.validate()?;
        let root = resolve_workspace(explicit, config.workspace.as_deref())?;
        tracing::debug!(workspace = %root.display(), "resolved workspace");

        let scanner = Scanner::new(Arc::new(PatternCatalog::builtin()?))
            .with_extra_skip_dirs(config.extra_skip_dirs.iter().cloned())
            .with_max_file_bytes(config.max_file_bytes);
        let workspace =
            Workspace::new(root).with_self_names(config.self_skill_names.iter().cloned());
        Ok(Self::new(workspace, scanner).with_scan_concurrency(config.scan_concurrency))
    }

    pub fn with_scan_concurrency(mut self, scan_concurrency: usize) -> Self {
        self.scan_concurrency = scan_concurrency.max(1);
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn policy_store(&self) -> &PolicyStore {
        &self.policy_store
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn scan_concurrency(&self) -> usize {
        self.scan_concurrency
    }

    pub fn active_skills(&self) -> Vec<Skill> {
        skills::discover_active(&self.workspace)
    }

    pub fn quarantined_skills(&self) -> Vec<Skill> {
        skills::discover_quarantined(&self.workspace)
    }

    /// Current status derived from the tree and the vault. `None` when the
    /// name is unknown everywhere.
    pub fn status_of(&self, name: &str) -> Option<SkillStatus> {
        if self.workspace.active_dir(name).is_dir() {
            Some(SkillStatus::Active)
        } else if self.workspace.quarantined_dir(name).is_dir() {
            Some(SkillStatus::Quarantined)
        } else if self.vault.contains(name) {
            Some(SkillStatus::Revoked)
        } else {
            None
        }
    }
}
