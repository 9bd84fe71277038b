//! Decision engine.
//!
//! Two ordered layers contribute reasons:
//! - System: immutable, `serialization` is always denied
//! - User: the policy file when present, otherwise the unmanaged fallback
//!   that only flags elevated risk for review
//!
//! Every applicable reason is collected. The strongest disposition governs
//! and the decision carries the reasons at that strength.

use serde::Serialize;

use super::{Policy, Rule};
use crate::audit::{Category, PermissionProfile, RiskLevel, Severity, highest_risk};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Allowed,
    Review,
    Denied,
}

/// What made a category count against the skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum Trigger {
    /// Hard-coded system rule; cannot be relaxed by the policy file.
    SystemRule,
    PolicyDeny,
    ExceedsMaxRisk { risk: RiskLevel, max_risk: Severity },
    PolicyReview,
    /// No policy in force and the category ranks HIGH or above.
    ElevatedRisk { risk: Severity },
}

impl Trigger {
    pub fn disposition(&self) -> Disposition {
        match self {
            Self::SystemRule | Self::PolicyDeny | Self::ExceedsMaxRisk { .. } => {
                Disposition::Denied
            }
            Self::PolicyReview | Self::ElevatedRisk { .. } => Disposition::Review,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub category: Category,
    /// Findings in this category.
    pub count: usize,
    #[serde(flatten)]
    pub trigger: Trigger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Denied { reasons: Vec<Reason> },
    Review { reasons: Vec<Reason> },
    Allowed,
}

impl Decision {
    pub fn disposition(&self) -> Disposition {
        match self {
            Self::Denied { .. } => Disposition::Denied,
            Self::Review { .. } => Disposition::Review,
            Self::Allowed => Disposition::Allowed,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    pub fn is_review(&self) -> bool {
        matches!(self, Self::Review { .. })
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn reasons(&self) -> &[Reason] {
        match self {
            Self::Denied { reasons } | Self::Review { reasons } => reasons,
            Self::Allowed => &[],
        }
    }

    /// Distinct triggering categories, in report order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.reasons().iter().map(|r| r.category).collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

enum Layer<'a> {
    System,
    User(&'a Policy),
    Unmanaged,
}

impl Layer<'_> {
    fn evaluate(&self, profile: &PermissionProfile, reasons: &mut Vec<Reason>) {
        match self {
            Self::System => {
                if profile.contains(Category::Serialization) {
                    reasons.push(reason(profile, Category::Serialization, Trigger::SystemRule));
                }
            }
            Self::User(policy) => {
                for category in profile.categories() {
                    match policy.rule(category) {
                        Rule::Deny => reasons.push(reason(profile, category, Trigger::PolicyDeny)),
                        Rule::Review => {
                            reasons.push(reason(profile, category, Trigger::PolicyReview));
                        }
                        Rule::Allow => {}
                    }
                }

                let risk = highest_risk(profile);
                if risk.exceeds(policy.max_risk) {
                    let over_cap = profile
                        .categories()
                        .filter(|c| RiskLevel::from(c.severity()).exceeds(policy.max_risk));
                    for category in over_cap {
                        let trigger = Trigger::ExceedsMaxRisk {
                            risk,
                            max_risk: policy.max_risk,
                        };
                        reasons.push(reason(profile, category, trigger));
                    }
                }
            }
            Self::Unmanaged => {
                for category in profile.categories() {
                    let severity = category.severity();
                    if RiskLevel::from(severity).is_elevated() {
                        let trigger = Trigger::ElevatedRisk { risk: severity };
                        reasons.push(reason(profile, category, trigger));
                    }
                }
            }
        }
    }
}

fn reason(profile: &PermissionProfile, category: Category, trigger: Trigger) -> Reason {
    Reason {
        category,
        count: profile.count(category),
        trigger,
    }
}

/// Decide a skill's fate. Total and side-effect free.
pub fn decide(profile: &PermissionProfile, policy: Option<&Policy>) -> Decision {
    let user = policy.map_or(Layer::Unmanaged, Layer::User);

    let mut reasons = Vec::new();
    for layer in [Layer::System, user] {
        layer.evaluate(profile, &mut reasons);
    }

    resolve(reasons)
}

fn resolve(reasons: Vec<Reason>) -> Decision {
    let strongest = reasons
        .iter()
        .map(|r| r.trigger.disposition())
        .max()
        .unwrap_or(Disposition::Allowed);

    let reasons: Vec<Reason> = reasons
        .into_iter()
        .filter(|r| r.trigger.disposition() == strongest)
        .collect();

    match strongest {
        Disposition::Denied => Decision::Denied { reasons },
        Disposition::Review => Decision::Review { reasons },
        Disposition::Allowed => Decision::Allowed,
    }
}
