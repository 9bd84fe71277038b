use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{Category, PermissionProfile, highest_risk};
use crate::error::TransitionError;
use crate::util::{copy_tree, write_atomic};

pub const RECORD_FILE: &str = "revocation.json";
pub const BACKUP_DIR: &str = "skill";
const STAGING_DIR: &str = "skill.partial";
pub const UNKNOWN_RISK: &str = "UNKNOWN";

/// Written once per revocation. A later revocation of the same name replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    #[serde(rename = "skill")]
    pub skill_name: String,
    pub revoked_at: DateTime<Utc>,
    pub original_path: PathBuf,
    /// Finding counts per category at revocation time.
    #[serde(default)]
    pub permissions: BTreeMap<Category, usize>,
    /// `CLEAN`..`CRITICAL`, or `UNKNOWN` when the scan failed.
    pub risk: String,
}

impl VaultRecord {
    pub fn new(
        skill_name: &str,
        original_path: &Path,
        profile: Option<&PermissionProfile>,
    ) -> Self {
        let (permissions, risk) = match profile {
            Some(profile) => (profile.counts(), highest_risk(profile).to_string()),
            None => (BTreeMap::new(), UNKNOWN_RISK.to_string()),
        };
        Self {
            skill_name: skill_name.to_string(),
            revoked_at: Utc::now(),
            original_path: original_path.to_path_buf(),
            permissions,
            risk,
        }
    }
}

/// `.quarantine/arbiter/<name>/{revocation.json,skill/}`
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn entry(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn record_path(&self, name: &str) -> PathBuf {
        self.entry(name).join(RECORD_FILE)
    }

    pub fn backup_path(&self, name: &str) -> PathBuf {
        self.entry(name).join(BACKUP_DIR)
    }

    pub fn write_record(&self, record: &VaultRecord) -> Result<PathBuf, TransitionError> {
        let path = self.record_path(&record.skill_name);
        let mut json = serde_json::to_string_pretty(record)?;
        json.push('\n');
        write_atomic(&path, json.as_bytes())
            .map_err(|err| TransitionError::io("write vault record", &path, err))?;
        Ok(path)
    }

    /// Replace any earlier backup of `name` with a copy of `source`.
    ///
    /// The copy is staged next to the backup and swapped in only once it is
    /// complete, so a failed copy leaves the earlier backup untouched.
    pub fn store_backup(&self, name: &str, source: &Path) -> Result<PathBuf, TransitionError> {
        let backup = self.backup_path(name);
        let staging = self.entry(name).join(STAGING_DIR);
        if staging.exists() {
            fs::remove_dir_all(&staging)
                .map_err(|err| TransitionError::io("clear vault staging", &staging, err))?;
        }

        let installed = copy_tree(source, &staging)
            .map_err(|err| TransitionError::io("copy into vault", &staging, err))
            .and_then(|()| replace_dir(&staging, &backup));
        if installed.is_err() && staging.exists() {
            let _ = fs::remove_dir_all(&staging);
        }
        installed.map(|()| backup)
    }

    /// Roll back a record written by a revocation that did not complete,
    /// restoring `previous` when the name had been revoked before.
    pub fn discard(&self, name: &str, previous: Option<&VaultRecord>) {
        let path = self.record_path(name);
        let restored = match previous {
            Some(record) => self.write_record(record).map(|_| ()),
            None => fs::remove_file(&path)
                .map_err(|err| TransitionError::io("remove vault record", &path, err)),
        };
        if let Err(err) = restored {
            tracing::warn!("vault entry for {name} may be stale: {err}");
        }
        // Only succeeds when nothing else is left in the entry.
        let _ = fs::remove_dir(self.entry(name));
    }

    pub fn record(&self, name: &str) -> Option<VaultRecord> {
        let raw = fs::read_to_string(self.record_path(name)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("unreadable vault record for {name}: {err}");
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.record_path(name).is_file()
    }

    /// Every readable record, sorted by skill name.
    pub fn records(&self) -> Vec<VaultRecord> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
            .collect();
        names.sort();

        names.iter().filter_map(|name| self.record(name)).collect()
    }
}

fn replace_dir(staging: &Path, backup: &Path) -> Result<(), TransitionError> {
    if backup.exists() {
        fs::remove_dir_all(backup)
            .map_err(|err| TransitionError::io("clear vault backup", backup, err))?;
    }
    fs::rename(staging, backup)
        .map_err(|err| TransitionError::io("install vault backup", backup, err))
}
