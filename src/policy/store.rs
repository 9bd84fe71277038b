use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{Policy, Rule};
use crate::audit::{Category, Severity};
use crate::error::PolicyError;
use crate::util::write_atomic;

/// On-disk shape. Rule keys are kept as strings so an unknown category does
/// not invalidate the whole document.
#[derive(Debug, Deserialize)]
struct PolicyDocument {
    #[serde(default = "super::default_max_risk")]
    max_risk: Severity,
    #[serde(default)]
    rules: BTreeMap<String, Rule>,
}

impl From<PolicyDocument> for Policy {
    fn from(doc: PolicyDocument) -> Self {
        let mut rules = BTreeMap::new();
        for (key, rule) in doc.rules {
            match key.parse::<Category>() {
                Ok(category) => {
                    rules.insert(category, rule);
                }
                Err(_) => tracing::warn!("ignoring policy rule for unknown category {key:?}"),
            }
        }
        Self {
            max_risk: doc.max_risk,
            rules,
        }
    }
}

/// The workspace policy file. Single writer by convention; no locking.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    path: PathBuf,
}

impl PolicyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// The saved policy, or `None` when absent, unreadable or malformed.
    pub fn load(&self) -> Option<Policy> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("cannot read policy {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<PolicyDocument>(&raw) {
            Ok(doc) => Some(doc.into()),
            Err(err) => {
                tracing::warn!(
                    "malformed policy {}, falling back to defaults: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    pub fn load_or_default(&self) -> Policy {
        self.load().unwrap_or_default()
    }

    /// Overwrite the policy file.
    pub fn save(&self, policy: &Policy) -> Result<(), PolicyError> {
        let mut json = serde_json::to_string_pretty(policy)?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes()).map_err(|source| PolicyError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
