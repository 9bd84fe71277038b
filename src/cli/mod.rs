use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `skill-arbiter` - permission auditor and policy enforcer for agent skills.
#[derive(Parser, Debug)]
#[command(name = "skill-arbiter")]
#[command(version)]
#[command(
    about = "Audit what installed skills can do and quarantine the ones policy forbids.",
    long_about = None
)]
pub struct Cli {
    /// Workspace root (default: $OPENCLAW_WORKSPACE, config, or auto-detected)
    #[arg(short, long, global = true)]
    pub workspace: Option<String>,

    /// Config file (default: ~/.skill-arbiter/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Full permission findings for one skill or all active skills
    Audit {
        /// Skill name (default: every active skill)
        skill: Option<String>,
    },

    /// Compact permission matrix
    Report {
        /// Skill name (default: every active skill)
        skill: Option<String>,
    },

    /// Counts of active, risky, quarantined and revoked skills
    Status,

    /// Show the workspace policy
    Policy {
        /// Write the default policy if none exists
        #[arg(long)]
        init: bool,
    },

    /// Preview policy decisions without moving anything
    Enforce {
        /// Skill name (default: every active skill)
        skill: Option<String>,
    },

    /// Move a skill out of the agent's load path
    Quarantine { skill: String },

    /// Restore a quarantined skill
    Unquarantine { skill: String },

    /// Back up a skill into the vault and delete it
    Revoke { skill: String },

    /// Scan everything, quarantine what policy denies, flag high risk
    Protect,
}
