//! Pattern catalog for the permission scanner.
//!
//! Two script families are recognised:
//! - Python, by `.py` extension
//! - Shell, by `.sh`/`.bash`/`.zsh` extension or a shell shebang
//!
//! The catalog is compiled once and handed to the [`Scanner`](super::Scanner)
//! explicitly. There is no process-wide registry.

use std::path::Path;

use regex::Regex;
use serde::Serialize;
use strum::Display;

use super::profile::Category;
use crate::error::ScanError;

mod python;
mod shell;

use python::PYTHON_PATTERNS;
use shell::{SHELL_INTERPRETERS, SHELL_PATTERNS};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScriptFamily {
    Python,
    Shell,
}

impl ScriptFamily {
    /// Pick the family for a file from its extension, falling back to the
    /// shebang on its first line. `None` means the file is not scanned.
    pub fn detect(path: &Path, first_line: &str) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("py") => return Some(Self::Python),
            Some("sh" | "bash" | "zsh") => return Some(Self::Shell),
            _ => {}
        }

        shebang_interpreter(first_line)
            .filter(|interpreter| SHELL_INTERPRETERS.contains(interpreter))
            .map(|_| Self::Shell)
    }

    /// Whole-line comments are never candidates. Shell treats `#!` as code.
    pub fn is_comment(self, line: &str) -> bool {
        let trimmed = line.trim();
        match self {
            Self::Python => trimmed.starts_with('#'),
            Self::Shell => trimmed.starts_with('#') && !trimmed.starts_with("#!"),
        }
    }
}

/// `#!/usr/bin/env -S bash -e` -> `bash`, `#!/bin/sh` -> `sh`.
fn shebang_interpreter(first_line: &str) -> Option<&str> {
    let rest = first_line.strip_prefix("#!")?;
    let mut words = rest.split_whitespace();
    let program = basename(words.next()?);
    if program != "env" {
        return Some(program);
    }
    words.find(|word| !word.starts_with('-')).map(basename)
}

fn basename(program: &str) -> &str {
    program.rsplit('/').next().unwrap_or(program)
}

/// A single line matcher and the description reported with its findings.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub category: Category,
    pub matcher: Regex,
    pub description: &'static str,
}

impl Pattern {
    pub fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }
}

/// Immutable (family, category) -> ordered matcher table.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    python: Vec<Pattern>,
    shell: Vec<Pattern>,
}

impl PatternCatalog {
    pub fn builtin() -> Result<Self, ScanError> {
        Ok(Self {
            python: compile(PYTHON_PATTERNS)?,
            shell: compile(SHELL_PATTERNS)?,
        })
    }

    pub fn patterns_for(&self, family: ScriptFamily) -> &[Pattern] {
        match family {
            ScriptFamily::Python => &self.python,
            ScriptFamily::Shell => &self.shell,
        }
    }

    /// Matchers of one category, in catalog order.
    pub fn category_patterns(
        &self,
        family: ScriptFamily,
        category: Category,
    ) -> impl Iterator<Item = &Pattern> {
        self.patterns_for(family)
            .iter()
            .filter(move |pattern| pattern.category == category)
    }
}

fn compile(table: &[(Category, &'static str, &'static str)]) -> Result<Vec<Pattern>, ScanError> {
    table
        .iter()
        .map(|&(category, pattern, description)| {
            let matcher =
                Regex::new(pattern).map_err(|source| ScanError::Pattern { pattern, source })?;
            Ok(Pattern {
                category,
                matcher,
                description,
            })
        })
        .collect()
}
