use serde::Serialize;
use strum::Display;

/// Overall verdict of a command, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Clean,
    Attention,
    Blocking,
}

impl Outcome {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::Attention => 1,
            Self::Blocking => 2,
        }
    }
}
