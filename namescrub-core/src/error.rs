use crate::safety::DangerousRoot;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before (or outside of) the per-file rename step.
///
/// Collisions and individual rename failures are not errors at this level;
/// they are reported per entry and the run still succeeds.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{} is not a directory", path.display())]
    InvalidTarget { path: PathBuf },

    #[error("phrase cannot be empty")]
    EmptyPhrase,

    #[error("replace mode needs replacement text")]
    MissingReplacement,

    #[error("invalid phrase pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("refusing to run on {} ({rule}) without --force", path.display())]
    Refused { path: PathBuf, rule: DangerousRoot },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidTarget { .. }
            | Self::EmptyPhrase
            | Self::MissingReplacement
            | Self::Pattern(_) => 1,
            Self::Refused { .. } => 2,
            Self::Io(_) => 3,
        }
    }
}
