use crate::output::Progress;
use crate::scanner::{Plan, RenamePlanEntry};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which branch a plan entry took during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Renamed,
    Previewed,
    /// Target already taken; the file was left alone.
    Collision,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub original: PathBuf,
    pub proposed: PathBuf,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionStats {
    /// Entries in the plan.
    pub planned: usize,
    /// Renamed, or would be renamed in a dry run.
    pub changed: usize,
    pub collisions: usize,
    pub errors: usize,
}

impl ExecutionStats {
    fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Renamed | EntryOutcome::Previewed => self.changed += 1,
            EntryOutcome::Collision => self.collisions += 1,
            EntryOutcome::Error { .. } => self.errors += 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionReport {
    pub entries: Vec<EntryReport>,
    pub stats: ExecutionStats,
}

/// Targets handed out so far, plus sources a preview has moved away.
#[derive(Default)]
struct Claims {
    targets: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

/// Execute `plan` in order. Only renames when `apply` is set.
///
/// The target is re-checked against the filesystem right before each rename,
/// so the first entry to claim a name wins and later ones become collisions.
/// A failed rename is recorded on its entry and the batch carries on. The only
/// error returned is a failure to write progress; it is reported once the
/// whole plan has been executed, and no further progress is written after it.
pub fn execute_plan(
    plan: &Plan,
    apply: bool,
    progress: &mut dyn Progress,
) -> io::Result<ExecutionReport> {
    let mut report = ExecutionReport {
        entries: Vec::with_capacity(plan.entries.len()),
        stats: ExecutionStats {
            planned: plan.entries.len(),
            ..ExecutionStats::default()
        },
    };
    let mut claims = Claims::default();
    let mut write_error: Option<io::Error> = None;

    for entry in &plan.entries {
        let outcome = execute_entry(entry, apply, &mut claims);
        let entry_report = EntryReport {
            original: entry.original.clone(),
            proposed: entry.proposed.clone(),
            outcome,
        };

        report.stats.record(&entry_report.outcome);
        if write_error.is_none() {
            if let Err(err) = progress.entry(&plan.root, &entry_report) {
                tracing::warn!(error = %err, "progress output failed, finishing plan silently");
                write_error = Some(err);
            }
        }
        report.entries.push(entry_report);
    }

    match write_error {
        Some(err) => Err(err),
        None => Ok(report),
    }
}

fn execute_entry(entry: &RenamePlanEntry, apply: bool, claims: &mut Claims) -> EntryOutcome {
    if !entry.stays_in_directory() {
        return EntryOutcome::Error {
            message: format!(
                "proposed path {} is not a file name in the same directory",
                entry.proposed.display()
            ),
        };
    }

    if target_taken(entry, claims) {
        return EntryOutcome::Collision;
    }

    if !apply {
        claims.targets.insert(entry.proposed.clone());
        claims.vacated.insert(entry.original.clone());
        return EntryOutcome::Previewed;
    }

    match perform_rename(&entry.original, &entry.proposed) {
        Ok(()) => {
            claims.targets.insert(entry.proposed.clone());
            EntryOutcome::Renamed
        },
        Err(err) => {
            tracing::debug!(from = %entry.original.display(), error = %err, "rename failed");
            EntryOutcome::Error {
                message: format!("{err:#}"),
            }
        },
    }
}

fn target_taken(entry: &RenamePlanEntry, claims: &Claims) -> bool {
    if claims.targets.contains(&entry.proposed) {
        return true;
    }
    if claims.vacated.contains(&entry.proposed) {
        return false;
    }

    match fs::symlink_metadata(&entry.proposed) {
        Ok(_) => !is_case_variant_of_same_file(&entry.original, &entry.proposed),
        Err(_) => false,
    }
}

/// True when `to` is `from` spelled with different letter case and only
/// resolves to it because the filesystem ignores case. Hardlinks whose names
/// differ by case are distinct directory entries and do not count.
fn is_case_variant_of_same_file(from: &Path, to: &Path) -> bool {
    let from_lower = from.to_string_lossy().to_lowercase();
    let to_lower = to.to_string_lossy().to_lowercase();
    if from == to || from_lower != to_lower {
        return false;
    }
    same_file(from, to) && !directory_lists_exact(to)
}

/// Whether the parent directory has an entry named exactly like `path`.
/// Unreadable directories count as listing it.
fn directory_lists_exact(path: &Path) -> bool {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return true;
    };
    match fs::read_dir(parent) {
        Ok(entries) => entries
            .filter_map(std::result::Result::ok)
            .any(|entry| entry.file_name() == name),
        Err(_) => true,
    }
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Rename a single file. Case-only renames go through a temporary name.
fn perform_rename(from: &Path, to: &Path) -> Result<()> {
    tracing::debug!(from = %from.display(), to = %to.display(), "renaming");

    if is_case_variant_of_same_file(from, to) {
        let file_name = from
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = from.with_file_name(format!(
            ".{file_name}.{}.namescrub.tmp",
            std::process::id()
        ));

        return rename_via_temp(from, &temp, to);
    }

    fs::rename(from, to)?;
    Ok(())
}

/// Two-step rename. If the second step fails the file is moved back to `from`.
fn rename_via_temp(from: &Path, temp: &Path, to: &Path) -> Result<()> {
    fs::rename(from, temp).context("rename to temporary name failed")?;

    let Err(err) = fs::rename(temp, to) else {
        return Ok(());
    };
    match fs::rename(temp, from) {
        Ok(()) => Err(anyhow::Error::new(err)
            .context("rename from temporary name failed, original name restored")),
        Err(restore) => Err(anyhow!(
            "rename from temporary name failed: {err}; restoring {} from {} also failed: {restore}",
            from.display(),
            temp.display()
        )),
    }
}
