use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use super::{ScanFailure, partition, scan_selection};
use crate::audit::{Category, RiskLevel, highest_risk};
use crate::error::WorkspaceError;
use crate::lifecycle::LifecycleManager;

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub skill: String,
    pub risk: RiskLevel,
    /// Every category, zero-filled, in category order.
    pub counts: BTreeMap<Category, usize>,
}

/// Compact permission overview. Informational only; always exits clean.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionMatrix {
    pub rows: Vec<MatrixRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScanFailure>,
}

pub async fn permission_matrix(
    manager: &LifecycleManager,
    name: Option<&str>,
) -> Result<PermissionMatrix, WorkspaceError> {
    let (scanned, failures) = partition(scan_selection(manager, name).await?);
    let rows = scanned
        .into_iter()
        .map(|(skill, profile)| {
            let counts = Category::iter()
                .map(|category| (category, profile.count(category)))
                .collect();
            MatrixRow {
                skill: skill.name,
                risk: highest_risk(&profile),
                counts,
            }
        })
        .collect();
    Ok(PermissionMatrix { rows, failures })
}
