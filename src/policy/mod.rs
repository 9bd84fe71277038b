//! User policy and the decision engine.
//!
//! A [`Policy`] assigns each [`Category`] a [`Rule`] and caps the tolerated
//! overall risk. [`decide`] layers it over the immutable system rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::audit::{Category, Severity};

mod engine;
mod store;

pub use engine::{Decision, Disposition, Reason, Trigger, decide};
pub use store::PolicyStore;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rule {
    #[default]
    Allow,
    Review,
    Deny,
}

/// Persisted rule set. Categories missing from `rules` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default = "default_max_risk")]
    pub max_risk: Severity,
    #[serde(default)]
    pub rules: BTreeMap<Category, Rule>,
}

fn default_max_risk() -> Severity {
    Severity::Medium
}

impl Policy {
    pub fn rule(&self, category: Category) -> Rule {
        self.rules.get(&category).copied().unwrap_or_default()
    }

    /// A policy with no rules and the given cap.
    pub fn permissive(max_risk: Severity) -> Self {
        Self {
            max_risk,
            rules: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, category: Category, rule: Rule) -> Self {
        self.rules.insert(category, rule);
        self
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::permissive(default_max_risk())
            .with_rule(Category::Serialization, Rule::Deny)
            .with_rule(Category::Subprocess, Rule::Review)
            .with_rule(Category::Network, Rule::Review)
            .with_rule(Category::FileWrite, Rule::Allow)
            .with_rule(Category::FileRead, Rule::Allow)
            .with_rule(Category::Environment, Rule::Allow)
            .with_rule(Category::Crypto, Rule::Allow)
    }
}
