use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Resource category a finding is filed under.
///
/// Declaration order is the report column order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Network,
    Subprocess,
    FileWrite,
    FileRead,
    Environment,
    Crypto,
    Serialization,
}

/// One detected occurrence of a risk-relevant pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    /// Path relative to the workspace root.
    pub file: PathBuf,
    /// 1-based.
    pub line: usize,
    pub description: String,
    pub snippet: String,
}

/// Findings of one skill grouped by category.
///
/// A category key is present only while it holds at least one finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionProfile {
    findings: BTreeMap<Category, Vec<Finding>>,
}

impl PermissionProfile {
    pub fn from_findings(findings: impl IntoIterator<Item = Finding>) -> Self {
        let mut profile = Self::default();
        for finding in findings {
            profile.push(finding);
        }
        profile
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings
            .entry(finding.category)
            .or_default()
            .push(finding);
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.findings.contains_key(&category)
    }

    /// Present categories in report order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.findings.keys().copied()
    }

    pub fn findings(&self, category: Category) -> &[Finding] {
        self.findings.get(&category).map_or(&[], Vec::as_slice)
    }

    pub fn count(&self, category: Category) -> usize {
        self.findings(category).len()
    }

    pub fn total(&self) -> usize {
        self.findings.values().map(Vec::len).sum()
    }

    /// Per-category finding counts, the shape persisted in vault records.
    pub fn counts(&self) -> BTreeMap<Category, usize> {
        self.findings
            .iter()
            .map(|(category, findings)| (*category, findings.len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Finding])> {
        self.findings
            .iter()
            .map(|(category, findings)| (*category, findings.as_slice()))
    }
}
