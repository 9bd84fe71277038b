use std::path::PathBuf;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `skill-arbiter`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the CLI glue continues to use
/// `anyhow::Result` for ad-hoc context chains.
///
/// Policy violations are never errors. They surface as
/// [`Decision`](crate::policy::Decision) outcomes.
#[derive(Debug, Error)]
pub enum ArbiterError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Workspace ───────────────────────────────────────────────────────
    #[error("workspace: {0}")]
    Workspace(#[from] WorkspaceError),

    // ── Scanner ─────────────────────────────────────────────────────────
    #[error("scan: {0}")]
    Scan(#[from] ScanError),

    // ── Lifecycle transitions ───────────────────────────────────────────
    #[error("transition: {0}")]
    Transition(#[from] TransitionError),

    // ── Policy store ────────────────────────────────────────────────────
    #[error("policy: {0}")]
    Policy(#[from] PolicyError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Workspace errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("skill not found: {0}")]
    UnknownSkill(String),
}

// ─── Scan errors ────────────────────────────────────────────────────────────

/// Only failure to enumerate the skill root is a scan error. Everything below
/// the root is skipped silently.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read skill directory {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("scan task failed: {0}")]
    Task(String),
}

// ─── Transition errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid skill name: {0:?}")]
    InvalidName(String),

    #[error("refusing to act on the arbiter's own skill: {0}")]
    SelfProtected(String),

    #[error("skill not found: {0}")]
    NotFound(String),

    #[error("cannot move skill {name}: {} already exists", path.display())]
    Collision { name: String, path: PathBuf },

    #[error("{op} failed for {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode vault record: {0}")]
    Record(#[from] serde_json::Error),
}

impl TransitionError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

// ─── Policy errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("cannot write policy {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode policy: {0}")]
    Encode(#[from] serde_json::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ArbiterError>;
