use crate::apply::{EntryOutcome, EntryReport, ExecutionStats};
use crate::pattern::Mode;
use nu_ansi_term::Color;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as FmtWrite;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Receives feedback while a run is in progress.
///
/// Every method defaults to doing nothing, so quiet sinks only implement
/// what they need.
pub trait Progress {
    fn matched(&mut self, _root: &Path, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn no_matches(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn scanned(&mut self, _root: &Path, _files_checked: usize) -> io::Result<()> {
        Ok(())
    }

    fn nothing_to_rename(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn dry_run_banner(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn entry(&mut self, _root: &Path, _report: &EntryReport) -> io::Result<()> {
        Ok(())
    }
}

/// Discards all feedback. Used for JSON output and in tests.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {}

/// Human-readable progress, one line per event.
pub struct LineProgress<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> LineProgress<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn tag(&self, color: Color, tag: &str) -> String {
        if self.use_color {
            color.bold().paint(tag).to_string()
        } else {
            tag.to_string()
        }
    }
}

impl<W: Write> Progress for LineProgress<W> {
    fn matched(&mut self, root: &Path, path: &Path) -> io::Result<()> {
        let tag = self.tag(Color::Blue, "[MATCH]");
        writeln!(self.out, "{tag} {}", display_relative(root, path))
    }

    fn no_matches(&mut self) -> io::Result<()> {
        writeln!(self.out, "No filenames matched the pattern.")
    }

    fn scanned(&mut self, root: &Path, files_checked: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "Scanned {files_checked} file(s) under: {}",
            root.display()
        )
    }

    fn nothing_to_rename(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "No filenames contained the phrase (with current options). Try --loose and/or -i."
        )
    }

    fn dry_run_banner(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Mode: DRY-RUN (no changes). Use --apply to perform renames.\n"
        )
    }

    fn entry(&mut self, root: &Path, report: &EntryReport) -> io::Result<()> {
        let from = display_relative(root, &report.original);
        let to = display_relative(root, &report.proposed);
        match &report.outcome {
            EntryOutcome::Renamed => {
                let tag = self.tag(Color::Green, "[RENAME]");
                writeln!(self.out, "{tag} {from} -> {to}")
            },
            EntryOutcome::Previewed => {
                let tag = self.tag(Color::Cyan, "[DRY-RUN]");
                writeln!(self.out, "{tag} {from} -> {to}")
            },
            EntryOutcome::Collision => {
                let tag = self.tag(Color::Yellow, "[SKIP]");
                writeln!(self.out, "{tag} Target exists: {to}  (from: {from})")
            },
            EntryOutcome::Error { message } => {
                let tag = self.tag(Color::Red, "[ERROR]");
                writeln!(self.out, "{tag} {from}: {message}")
            },
        }
    }
}

/// `path` relative to `root` when it lies below it, otherwise the full path.
pub fn display_relative(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Result of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub target: PathBuf,
    pub phrase: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    pub applied: bool,
    pub files_checked: usize,
    pub stats: ExecutionStats,
    pub entries: Vec<EntryReport>,
    /// Files reported by the list-matches pre-pass, if it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed_matches: Option<Vec<PathBuf>>,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RunResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": if self.applied { "apply" } else { "dry_run" },
            "target": self.target,
            "phrase": self.phrase,
            "mode": self.mode,
            "replacement": self.replacement,
            "summary": {
                "checked": self.files_checked,
                "matched": self.stats.planned,
                "changed": self.stats.changed,
                "collisions": self.stats.collisions,
                "errors": self.stats.errors,
            },
            "entries": self.entries,
            "matches": self.listed_matches,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        // Nothing was planned, the progress output already said so.
        if self.stats.planned == 0 {
            return output;
        }

        writeln!(output, "\nSummary:").unwrap();
        writeln!(output, "  Checked files:      {}", self.files_checked).unwrap();
        writeln!(output, "  Matched filenames:  {}", self.stats.planned).unwrap();
        writeln!(output, "  Changed (this run): {}", self.stats.changed).unwrap();
        writeln!(output, "  Collisions skipped: {}", self.stats.collisions).unwrap();
        writeln!(output, "  Errors:             {}", self.stats.errors).unwrap();

        if !self.applied {
            writeln!(
                output,
                "\nThis was a dry run. Add --apply to perform the renames."
            )
            .unwrap();
        }

        output
    }
}
