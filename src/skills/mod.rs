//! Skill discovery.
//!
//! Skills are re-derived from the directory tree on every call. Status is a
//! pure function of the directory name; nothing is cached between calls.

use std::path::{Path, PathBuf};

use serde::Serialize;
use strum::Display;

use crate::workspace::{QUARANTINE_PREFIX, SKILL_DESCRIPTOR, VAULT_DIR, Workspace};

mod metadata;

pub use metadata::{SkillMetadata, parse_frontmatter, read_metadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkillStatus {
    Active,
    Quarantined,
    Revoked,
}

impl SkillStatus {
    /// Classify a directory under `skills/` by its name, returning the status
    /// and the skill name with any quarantine marker removed.
    pub fn from_dir_name(dir_name: &str) -> (Self, &str) {
        match dir_name.strip_prefix(QUARANTINE_PREFIX) {
            Some(name) => (Self::Quarantined, name),
            None => (Self::Active, dir_name),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    /// Directory-derived identity, without the quarantine marker.
    pub name: String,
    pub path: PathBuf,
    pub status: SkillStatus,
    pub metadata: SkillMetadata,
}

impl Skill {
    fn from_dir(path: PathBuf, status: SkillStatus, name: &str) -> Self {
        let metadata = read_metadata(&path.join(SKILL_DESCRIPTOR));
        Self {
            name: name.to_string(),
            path,
            status,
            metadata,
        }
    }

    /// Name from the descriptor when declared, else the directory name.
    pub fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.name
        } else {
            &self.metadata.name
        }
    }
}

/// Every active skill (descriptor present, not quarantined, not the arbiter
/// itself), sorted by name.
pub fn discover_active(workspace: &Workspace) -> Vec<Skill> {
    skill_dirs(&workspace.skills_dir())
        .into_iter()
        .filter_map(|(path, dir_name)| {
            if workspace.is_self(&dir_name) || dir_name.starts_with(VAULT_DIR) {
                return None;
            }
            let (status, name) = SkillStatus::from_dir_name(&dir_name);
            if status != SkillStatus::Active || !path.join(SKILL_DESCRIPTOR).is_file() {
                return None;
            }
            Some(Skill::from_dir(path, status, name))
        })
        .collect()
}

/// Every quarantined skill, sorted by directory name.
pub fn discover_quarantined(workspace: &Workspace) -> Vec<Skill> {
    skill_dirs(&workspace.skills_dir())
        .into_iter()
        .filter_map(|(path, dir_name)| {
            let (status, name) = SkillStatus::from_dir_name(&dir_name);
            if status != SkillStatus::Quarantined || workspace.is_self(name) {
                return None;
            }
            Some(Skill::from_dir(path, status, name))
        })
        .collect()
}

/// Look up one active skill by name.
pub fn find_active(workspace: &Workspace, name: &str) -> Option<Skill> {
    discover_active(workspace)
        .into_iter()
        .find(|skill| skill.name == name)
}

fn skill_dirs(skills_dir: &Path) -> Vec<(PathBuf, String)> {
    let Ok(entries) = std::fs::read_dir(skills_dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<(PathBuf, String)> = entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            Some((entry.path(), name))
        })
        .collect();
    dirs.sort_by(|a, b| a.1.cmp(&b.1));
    dirs
}
