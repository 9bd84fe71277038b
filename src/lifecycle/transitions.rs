use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use super::LifecycleManager;
use super::vault::VaultRecord;
use crate::error::TransitionError;
use crate::workspace::QUARANTINE_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarantineOutcome {
    Quarantined,
    AlreadyQuarantined,
}

#[derive(Debug, Clone, Serialize)]
pub struct Revocation {
    pub record: VaultRecord,
    pub record_path: PathBuf,
    pub backup_path: PathBuf,
}

impl LifecycleManager {
    /// Active → Quarantined by a single rename. Repeating it is a no-op.
    pub fn quarantine(&mut self, name: &str) -> Result<QuarantineOutcome, TransitionError> {
        self.check_name(name)?;
        let active = self.workspace.active_dir(name);
        let quarantined = self.workspace.quarantined_dir(name);

        if active.is_dir() {
            if quarantined.exists() {
                return Err(TransitionError::Collision {
                    name: name.to_string(),
                    path: quarantined,
                });
            }
            fs::rename(&active, &quarantined)
                .map_err(|err| TransitionError::io("rename", &active, err))?;
            info!(skill = name, "quarantined");
            return Ok(QuarantineOutcome::Quarantined);
        }

        if quarantined.is_dir() {
            return Ok(QuarantineOutcome::AlreadyQuarantined);
        }

        Err(TransitionError::NotFound(name.to_string()))
    }

    /// Quarantined → Active. Never overwrites an active directory.
    pub fn unquarantine(&mut self, name: &str) -> Result<(), TransitionError> {
        self.check_name(name)?;
        let active = self.workspace.active_dir(name);
        let quarantined = self.workspace.quarantined_dir(name);

        if !quarantined.is_dir() {
            return Err(TransitionError::NotFound(name.to_string()));
        }
        if active.exists() {
            return Err(TransitionError::Collision {
                name: name.to_string(),
                path: active,
            });
        }

        fs::rename(&quarantined, &active)
            .map_err(|err| TransitionError::io("rename", &quarantined, err))?;
        info!(skill = name, "unquarantined; re-audit before use");
        Ok(())
    }

    /// {Active, Quarantined} → Revoked: snapshot, record, back up, delete.
    ///
    /// A previous vault entry for the same name is overwritten.
    pub fn revoke(&mut self, name: &str) -> Result<Revocation, TransitionError> {
        self.check_name(name)?;
        let active = self.workspace.active_dir(name);
        let quarantined = self.workspace.quarantined_dir(name);
        let source = if active.is_dir() {
            active
        } else if quarantined.is_dir() {
            quarantined
        } else {
            return Err(TransitionError::NotFound(name.to_string()));
        };

        let profile = match self.scanner.scan(&source, self.workspace.root()) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(skill = name, "scan before revocation failed: {err}");
                None
            }
        };

        let previous = self.vault.record(name);
        let record = VaultRecord::new(name, &source, profile.as_ref());
        let record_path = self.vault.write_record(&record)?;
        let backup_path = match self.vault.store_backup(name, &source) {
            Ok(path) => path,
            Err(err) => {
                self.vault.discard(name, previous.as_ref());
                return Err(err);
            }
        };
        // The backup is complete from here on; a failed delete keeps the
        // vault entry so nothing is lost.
        fs::remove_dir_all(&source)
            .map_err(|err| TransitionError::io("remove original", &source, err))?;

        info!(
            skill = name,
            risk = %record.risk,
            backup = %backup_path.display(),
            "revoked"
        );
        Ok(Revocation {
            record,
            record_path,
            backup_path,
        })
    }

    fn check_name(&self, name: &str) -> Result<(), TransitionError> {
        let mut components = Path::new(name).components();
        let single_component = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_component
            || name.contains(['/', '\\'])
            || name.starts_with(QUARANTINE_PREFIX)
        {
            return Err(TransitionError::InvalidName(name.to_string()));
        }
        if self.workspace.is_self(name) {
            return Err(TransitionError::SelfProtected(name.to_string()));
        }
        Ok(())
    }
}
