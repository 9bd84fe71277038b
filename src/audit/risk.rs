//! Risk classification.
//!
//! Every [`Category`] carries a fixed [`Severity`]. A profile collapses to the
//! highest severity among its present categories, or [`RiskLevel::Clean`]
//! when nothing was found.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::profile::{Category, PermissionProfile};

/// Ordinal risk rank. Declaration order is the total order.
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
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Severity plus a distinguished `CLEAN` level below `LOW`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskLevel {
    Clean,
    Low,
    Medium,
    High,
    Critical,
}

impl From<Severity> for RiskLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => Self::Low,
            Severity::Medium => Self::Medium,
            Severity::High => Self::High,
            Severity::Critical => Self::Critical,
        }
    }
}

impl RiskLevel {
    /// HIGH and CRITICAL skills are flagged for review by a sweep.
    pub fn is_elevated(self) -> bool {
        self >= Self::High
    }

    pub fn exceeds(self, max: Severity) -> bool {
        self > Self::from(max)
    }
}

impl Category {
    pub const fn severity(self) -> Severity {
        match self {
            Self::Serialization => Severity::Critical,
            Self::Subprocess | Self::Network => Severity::High,
            Self::FileWrite | Self::Environment => Severity::Medium,
            Self::Crypto | Self::FileRead => Severity::Low,
        }
    }
}

pub fn highest_risk(profile: &PermissionProfile) -> RiskLevel {
    profile
        .categories()
        .map(|category| RiskLevel::from(category.severity()))
        .max()
        .unwrap_or(RiskLevel::Clean)
}
