use crate::error::RunError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which rule flagged a target directory as too dangerous to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DangerousRoot {
    FilesystemRoot,
    HomeDirectory,
}

impl fmt::Display for DangerousRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilesystemRoot => write!(f, "filesystem root"),
            Self::HomeDirectory => write!(f, "home directory"),
        }
    }
}

/// Classify `target` after resolving it to its canonical form.
///
/// A target that cannot be resolved is not considered dangerous.
pub fn classify_target(target: &Path, home: Option<&Path>) -> Option<DangerousRoot> {
    let resolved = match target.canonicalize() {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::debug!(path = %target.display(), error = %err, "could not resolve target, not blocking");
            return None;
        },
    };

    if resolved.parent().is_none() {
        return Some(DangerousRoot::FilesystemRoot);
    }

    let home = home.map(|home| home.canonicalize().unwrap_or_else(|_| home.to_path_buf()));
    if home.as_deref() == Some(resolved.as_path()) {
        return Some(DangerousRoot::HomeDirectory);
    }

    None
}

/// Refuse dangerous targets unless `force` is set.
pub fn check_target(target: &Path, home: Option<&Path>, force: bool) -> Result<(), RunError> {
    match classify_target(target, home) {
        Some(rule) if force => {
            tracing::warn!(path = %target.display(), %rule, "running on protected directory because of --force");
            Ok(())
        },
        Some(rule) => Err(RunError::Refused {
            path: resolved_or_given(target),
            rule,
        }),
        None => Ok(()),
    }
}

fn resolved_or_given(target: &Path) -> PathBuf {
    target
        .canonicalize()
        .unwrap_or_else(|_| target.to_path_buf())
}
