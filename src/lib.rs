#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod outcome;
pub mod policy;
pub mod reports;
pub mod skills;
#[doc(hidden)]
pub mod util;
pub mod workspace;

pub use config::ArbiterConfig;
pub use error::{ArbiterError, Result};
pub use lifecycle::LifecycleManager;
pub use outcome::Outcome;
