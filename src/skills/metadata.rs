use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

const FRONTMATTER_FENCE: &str = "---";

/// The few descriptor fields the arbiter consumes. Everything else in the
/// front-matter is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    pub requires_bins: BTreeSet<String>,
    pub requires_env: BTreeSet<String>,
    pub os: BTreeSet<String>,
}

/// Inline JSON carried by the `metadata:` key.
#[derive(Debug, Default, Deserialize)]
struct MetadataField {
    #[serde(default)]
    openclaw: OpenClawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct OpenClawMetadata {
    #[serde(default)]
    requires: Requirements,
    #[serde(default)]
    os: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Requirements {
    #[serde(default)]
    bins: Vec<String>,
    #[serde(default)]
    env: Vec<String>,
}

/// Read a `SKILL.md` descriptor. Missing or unreadable files yield defaults.
pub fn read_metadata(path: &Path) -> SkillMetadata {
    match std::fs::read(path) {
        Ok(bytes) => parse_frontmatter(&String::from_utf8_lossy(&bytes)),
        Err(err) => {
            tracing::debug!("no readable descriptor at {}: {err}", path.display());
            SkillMetadata::default()
        }
    }
}

/// Parse the leading `---` fenced block. Malformed input degrades to defaults.
pub fn parse_frontmatter(content: &str) -> SkillMetadata {
    let mut info = SkillMetadata::default();

    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some(FRONTMATTER_FENCE) {
        return info;
    }

    let mut block = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim() == FRONTMATTER_FENCE {
            closed = true;
            break;
        }
        block.push(line.trim());
    }
    if !closed {
        return info;
    }

    for line in block {
        if let Some(value) = line.strip_prefix("name:") {
            info.name = unquote(value);
        } else if let Some(value) = line.strip_prefix("description:") {
            info.description = unquote(value);
        } else if let Some(value) = line.strip_prefix("metadata:")
            && let Ok(field) = serde_json::from_str::<MetadataField>(value.trim())
        {
            let openclaw = field.openclaw;
            info.requires_bins = openclaw.requires.bins.into_iter().collect();
            info.requires_env = openclaw.requires.env.into_iter().collect();
            info.os = openclaw.os.into_iter().collect();
        }
    }

    info
}

fn unquote(value: &str) -> String {
    value
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .to_string()
}
