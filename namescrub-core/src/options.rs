use crate::error::RunError;
use crate::pattern::{Mode, Substitution};
use serde::Serialize;

/// Flags for a single run. Built once and never changed afterwards.
#[derive(Debug, Clone, Default, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    pub mode: Mode,
    /// Replacement text, required when `mode` is [`Mode::Replace`].
    pub replacement: Option<String>,
    pub ignore_case: bool,
    /// Treat hyphen and space variants as equal.
    pub loose: bool,
    pub recursive: bool,
    /// Rename for real instead of previewing.
    pub apply: bool,
    /// Bypass the root/home directory check.
    pub force: bool,
    /// Print every matching filename before planning.
    pub list_matches: bool,
}

impl RunOptions {
    pub fn substitution(&self) -> Result<Substitution, RunError> {
        match self.mode {
            Mode::Delete => Ok(Substitution::Delete),
            Mode::Replace => self
                .replacement
                .clone()
                .map(Substitution::Replace)
                .ok_or(RunError::MissingReplacement),
        }
    }
}
