#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use skill_arbiter::LifecycleManager;
use skill_arbiter::audit::{PatternCatalog, Scanner};
use skill_arbiter::workspace::Workspace;

/// A throwaway agent workspace with a `skills/` tree.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp workspace");
        fs::create_dir_all(dir.path().join("skills")).expect("skills dir");
        fs::write(dir.path().join("AGENTS.md"), "# agents\n").expect("marker");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.root().join("skills").join(name)
    }

    /// Create an active skill with a descriptor and one script.
    pub fn add_skill(&self, name: &str, file: &str, script: &str) -> PathBuf {
        let dir = self.skill_dir(name);
        fs::create_dir_all(&dir).expect("skill dir");
        fs::write(
            dir.join("SKILL.md"),
            format!(
                "---\nname: {name}\ndescription: \"{name} skill\"\nmetadata: {{\"openclaw\": {{\"requires\": {{\"bins\": [\"python3\"]}}}}}}\n---\n\n# {name}\n"
            ),
        )
        .expect("descriptor");
        self.add_file(name, file, script);
        dir
    }

    pub fn add_file(&self, name: &str, file: &str, content: &str) {
        let path = self.skill_dir(name).join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(path, content).expect("script");
    }

    pub fn write_policy(&self, json: &str) {
        fs::write(self.root().join(".arbiter-policy.json"), json).expect("policy");
    }

    pub fn manager(&self) -> LifecycleManager {
        let catalog = PatternCatalog::builtin().expect("builtin catalog");
        let scanner = Scanner::new(Arc::new(catalog));
        LifecycleManager::new(Workspace::new(self.root()), scanner)
    }
}
