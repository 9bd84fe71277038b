//! Workspace layout.
//!
//! ```text
//! <root>/
//!   skills/<name>/SKILL.md           active skill
//!   skills/.quarantined-<name>/      quarantined skill
//!   .arbiter-policy.json             user policy
//!   .quarantine/arbiter/<name>/      vault entry (revocation.json + skill/)
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

mod resolve;

pub use resolve::{WORKSPACE_ENV, resolve_workspace};

pub const SKILLS_DIR: &str = "skills";
pub const SKILL_DESCRIPTOR: &str = "SKILL.md";
pub const QUARANTINE_PREFIX: &str = ".quarantined-";
pub const VAULT_DIR: &str = ".quarantine";
pub const VAULT_NAMESPACE: &str = "arbiter";
pub const POLICY_FILE: &str = ".arbiter-policy.json";

/// Directory names the arbiter itself may be installed under.
pub const DEFAULT_SELF_SKILL_NAMES: &[&str] = &["openclaw-arbiter", "skill-arbiter"];

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    self_names: BTreeSet<String>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            self_names: DEFAULT_SELF_SKILL_NAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn with_self_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.self_names = names.into_iter().collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_self(&self, name: &str) -> bool {
        self.self_names.contains(name)
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.root.join(SKILLS_DIR)
    }

    pub fn active_dir(&self, name: &str) -> PathBuf {
        self.skills_dir().join(name)
    }

    pub fn quarantined_dir(&self, name: &str) -> PathBuf {
        self.skills_dir().join(format!("{QUARANTINE_PREFIX}{name}"))
    }

    pub fn policy_path(&self) -> PathBuf {
        self.root.join(POLICY_FILE)
    }

    pub fn vault_root(&self) -> PathBuf {
        self.root.join(VAULT_DIR).join(VAULT_NAMESPACE)
    }

    pub fn vault_entry(&self, name: &str) -> PathBuf {
        self.vault_root().join(name)
    }
}
