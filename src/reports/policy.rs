use std::path::PathBuf;

use serde::Serialize;

use crate::error::PolicyError;
use crate::outcome::Outcome;
use crate::policy::{Policy, PolicyStore};

#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    pub path: PathBuf,
    /// `None` when no readable policy file exists.
    pub policy: Option<Policy>,
    /// Set when this invocation wrote the file.
    pub created: bool,
}

impl PolicyView {
    pub fn outcome(&self) -> Outcome {
        if self.policy.is_some() {
            Outcome::Clean
        } else {
            Outcome::Attention
        }
    }
}

pub fn show_policy(store: &PolicyStore) -> PolicyView {
    PolicyView {
        path: store.path().to_path_buf(),
        policy: store.load(),
        created: false,
    }
}

/// Write the default policy unless a file is already there.
pub fn init_policy(store: &PolicyStore) -> Result<PolicyView, PolicyError> {
    if store.exists() {
        tracing::info!("policy already exists at {}", store.path().display());
        return Ok(show_policy(store));
    }

    let policy = Policy::default();
    store.save(&policy)?;
    tracing::info!("wrote default policy to {}", store.path().display());
    Ok(PolicyView {
        path: store.path().to_path_buf(),
        policy: Some(policy),
        created: true,
    })
}
