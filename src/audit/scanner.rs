use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::patterns::{PatternCatalog, ScriptFamily};
use super::profile::{Finding, PermissionProfile};
use crate::error::ScanError;
use crate::skills::Skill;

/// Infrastructure and prior-audit directories never descended into.
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    ".integrity",
    ".quarantine",
    ".snapshots",
];

/// Extensions worth reading. Extension-less files are read for shebang sniffing.
const SCANNABLE_EXTENSIONS: &[&str] = &["py", "sh", "bash", "zsh", "js", "ts"];

pub const SNIPPET_CHARS: usize = 80;

pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

/// Read-only, stateless static scanner.
///
/// Cloning is cheap (shared catalog), and a scan touches no shared mutable
/// state, so independent skills can be scanned in parallel.
#[derive(Debug, Clone)]
pub struct Scanner {
    catalog: Arc<PatternCatalog>,
    skip_dirs: Arc<BTreeSet<String>>,
    max_file_bytes: u64,
}

impl Scanner {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self {
            catalog,
            skip_dirs: Arc::new(SKIP_DIRS.iter().map(ToString::to_string).collect()),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_extra_skip_dirs(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        let mut skip_dirs = (*self.skip_dirs).clone();
        skip_dirs.extend(extra);
        self.skip_dirs = Arc::new(skip_dirs);
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Scan every script under `skill_dir`. Finding paths are relative to
    /// `workspace_root`.
    ///
    /// Only an unreadable skill root is an error; unreadable files and
    /// subdirectories are skipped.
    pub fn scan(
        &self,
        skill_dir: &Path,
        workspace_root: &Path,
    ) -> Result<PermissionProfile, ScanError> {
        let mut files = Vec::new();
        let entries = sorted_entries(skill_dir).map_err(|source| ScanError::Unreadable {
            path: skill_dir.to_path_buf(),
            source,
        })?;
        self.collect_files(entries, &mut files);

        let mut profile = PermissionProfile::default();
        for file in &files {
            for finding in self.scan_file(file, workspace_root) {
                profile.push(finding);
            }
        }
        Ok(profile)
    }

    fn collect_files(&self, entries: Vec<PathBuf>, files: &mut Vec<PathBuf>) {
        for path in entries {
            let Ok(meta) = fs::symlink_metadata(&path) else {
                continue;
            };

            if meta.is_dir() {
                let pruned = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| self.skip_dirs.contains(name));
                if pruned {
                    continue;
                }
                match sorted_entries(&path) {
                    Ok(children) => self.collect_files(children, files),
                    Err(err) => {
                        tracing::debug!("skipping unreadable dir {}: {err}", path.display());
                    }
                }
            } else if is_candidate(&path) && fs::metadata(&path).is_ok_and(|m| m.is_file()) {
                files.push(path);
            }
        }
    }

    /// Findings for a single file, in line order. Files of no known family,
    /// oversized files and unreadable files yield nothing.
    pub fn scan_file(&self, path: &Path, workspace_root: &Path) -> Vec<Finding> {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        if size > self.max_file_bytes {
            tracing::debug!("skipping oversized file {} ({size} bytes)", path.display());
            return Vec::new();
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!("skipping unreadable file {}: {err}", path.display());
                return Vec::new();
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        let first_line = content.lines().next().unwrap_or_default();
        let Some(family) = ScriptFamily::detect(path, first_line) else {
            return Vec::new();
        };

        let relative = path
            .strip_prefix(workspace_root)
            .unwrap_or(path)
            .to_path_buf();
        let patterns = self.catalog.patterns_for(family);

        let mut findings = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if family.is_comment(line) {
                continue;
            }
            for pattern in patterns.iter().filter(|p| p.is_match(line)) {
                findings.push(Finding {
                    category: pattern.category,
                    file: relative.clone(),
                    line: index + 1,
                    description: pattern.description.to_string(),
                    snippet: snippet(line),
                });
            }
        }
        findings
    }
}

fn is_candidate(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => ext
            .to_str()
            .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext)),
        None => true,
    }
}

fn snippet(line: &str) -> String {
    line.trim().chars().take(SNIPPET_CHARS).collect()
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

/// Scan many skills on the blocking pool, at most `concurrency` at a time.
///
/// Results come back in the order of `skills`.
pub async fn scan_skills(
    scanner: &Scanner,
    skills: Vec<Skill>,
    workspace_root: &Path,
    concurrency: usize,
) -> Vec<(Skill, Result<PermissionProfile, ScanError>)> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();
    let mut task_slots = HashMap::new();
    let mut outcomes: Vec<Option<Result<PermissionProfile, ScanError>>> =
        skills.iter().map(|_| None).collect();

    for (index, skill) in skills.iter().enumerate() {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(err) => {
                outcomes[index] = Some(Err(ScanError::Task(err.to_string())));
                continue;
            }
        };
        let scanner = scanner.clone();
        let skill_dir = skill.path.clone();
        let root = workspace_root.to_path_buf();
        let handle = tasks.spawn_blocking(move || {
            let _permit = permit;
            scanner.scan(&skill_dir, &root)
        });
        task_slots.insert(handle.id(), index);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, outcome) = match joined {
            Ok((id, outcome)) => (id, outcome),
            Err(err) => (err.id(), Err(ScanError::Task(err.to_string()))),
        };
        if let Some(&index) = task_slots.get(&id) {
            outcomes[index] = Some(outcome);
        }
    }

    skills
        .into_iter()
        .zip(outcomes)
        .map(|(skill, outcome)| {
            let outcome =
                outcome.unwrap_or_else(|| Err(ScanError::Task("scan did not complete".into())));
            (skill, outcome)
        })
        .collect()
}
