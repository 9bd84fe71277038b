use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::error::WorkspaceError;

pub const WORKSPACE_ENV: &str = "OPENCLAW_WORKSPACE";

/// Marker file identifying an agent workspace root.
const WORKSPACE_MARKER: &str = "AGENTS.md";

/// Resolve the workspace root.
///
/// Order: explicit flag, `OPENCLAW_WORKSPACE`, configured path, the current
/// directory when it holds `AGENTS.md`, `~/.openclaw/workspace` when it
/// exists, and finally the current directory.
pub fn resolve_workspace(
    explicit: Option<&str>,
    configured: Option<&str>,
) -> Result<PathBuf, WorkspaceError> {
    let env_value = std::env::var(WORKSPACE_ENV).ok();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    resolve_from(explicit, env_value.as_deref(), configured, &cwd, home.as_deref())
}

fn resolve_from(
    explicit: Option<&str>,
    env_value: Option<&str>,
    configured: Option<&str>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<PathBuf, WorkspaceError> {
    let requested = [explicit, env_value, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty());

    let candidate = match requested {
        Some(value) => PathBuf::from(shellexpand::tilde(value).as_ref()),
        None => fallback(cwd, home),
    };

    if !candidate.is_dir() {
        return Err(WorkspaceError::NotFound(candidate));
    }
    Ok(candidate.canonicalize().unwrap_or(candidate))
}

fn fallback(cwd: &Path, home: Option<&Path>) -> PathBuf {
    if cwd.join(WORKSPACE_MARKER).exists() {
        return cwd.to_path_buf();
    }
    if let Some(default) = home.map(|home| home.join(".openclaw").join("workspace"))
        && default.is_dir()
    {
        return default;
    }
    cwd.to_path_buf()
}
