use crate::apply::execute_plan;
use crate::error::RunError;
use crate::options::RunOptions;
use crate::output::{Progress, RunResult};
use crate::pattern::MatchPattern;
use crate::safety::check_target;
use crate::scanner::{find_matching_files, plan_renames};
use std::path::Path;

/// Run the whole pipeline: validate, check safety, plan, then execute.
///
/// `home` is the caller's home directory for the safety check. Feedback goes
/// to `progress` as it happens; the returned result carries the counts.
pub fn run_operation(
    target: &Path,
    phrase: &str,
    options: &RunOptions,
    home: Option<&Path>,
    progress: &mut dyn Progress,
) -> Result<RunResult, RunError> {
    if phrase.is_empty() {
        return Err(RunError::EmptyPhrase);
    }
    let substitution = options.substitution()?;

    if !target.is_dir() {
        return Err(RunError::InvalidTarget {
            path: target.to_path_buf(),
        });
    }
    let root = target
        .canonicalize()
        .unwrap_or_else(|_| target.to_path_buf());

    check_target(&root, home, options.force)?;

    let pattern = MatchPattern::new(phrase, options.ignore_case, options.loose, substitution)?;

    let listed_matches = if options.list_matches {
        let matches = find_matching_files(&root, options.recursive, &pattern);
        for path in &matches {
            progress.matched(&root, path)?;
        }
        if matches.is_empty() {
            progress.no_matches()?;
        }
        Some(matches)
    } else {
        None
    };

    let plan = plan_renames(&root, options.recursive, &pattern);
    progress.scanned(&root, plan.files_checked)?;
    tracing::debug!(
        files_checked = plan.files_checked,
        planned = plan.entries.len(),
        "planning finished"
    );

    let mut result = RunResult {
        target: root,
        phrase: phrase.to_string(),
        mode: options.mode,
        replacement: options.replacement.clone(),
        applied: options.apply,
        files_checked: plan.files_checked,
        stats: Default::default(),
        entries: vec![],
        listed_matches,
    };

    if plan.is_empty() {
        progress.nothing_to_rename()?;
        return Ok(result);
    }

    if !options.apply {
        progress.dry_run_banner()?;
    }

    let report = execute_plan(&plan, options.apply, progress)?;
    result.stats = report.stats;
    result.entries = report.entries;

    Ok(result)
}
