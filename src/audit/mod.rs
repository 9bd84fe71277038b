//! Static permission audit.
//!
//! Pipeline: Catalog → Scanner → Risk
//! Nothing here executes skill code; every operation is a read-only walk.

pub mod patterns;
mod profile;
pub mod risk;
mod scanner;

pub use patterns::{Pattern, PatternCatalog, ScriptFamily};
pub use profile::{Category, Finding, PermissionProfile};
pub use risk::{RiskLevel, Severity, highest_risk};
pub use scanner::{DEFAULT_MAX_FILE_BYTES, SKIP_DIRS, SNIPPET_CHARS, Scanner, scan_skills};
