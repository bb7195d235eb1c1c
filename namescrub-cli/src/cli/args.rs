use clap::Parser;
use std::path::PathBuf;

use super::types::{ModeArg, OutputFormat};

/// Delete or replace a phrase in filenames (dry-run by default)
#[derive(Parser, Debug)]
#[command(name = "namescrub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan. Prompted for when omitted
    pub target: Option<PathBuf>,

    /// The phrase to delete or replace (literal text)
    #[arg(short, long)]
    pub phrase: Option<String>,

    /// Delete or replace the phrase. Prompted for when omitted
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Replacement text (used only with --mode replace)
    #[arg(long)]
    pub replacement: Option<String>,

    /// Case-insensitive match
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Tolerant match: treat hyphen and space variants (en dash, no-break space, ...) as equal
    #[arg(long)]
    pub loose: bool,

    /// Recurse into subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Actually rename files (default is a dry run)
    #[arg(long)]
    pub apply: bool,

    /// Allow running on '/' or your home directory
    #[arg(long)]
    pub force: bool,

    /// List matching filenames before planning renames
    #[arg(long)]
    pub list_matches: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Disable colored output. Any non-empty NO_COLOR value other than false/0/no/off also disables it
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Log more detail to stderr (-v debug, -vv trace). Overrides NAMESCRUB_LOG
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
