#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod error;
pub mod normalize;
pub mod operations;
pub mod options;
pub mod output;
pub mod pattern;
pub mod safety;
pub mod scanner;

pub use apply::{execute_plan, EntryOutcome, EntryReport, ExecutionReport, ExecutionStats};
pub use error::RunError;
pub use normalize::{normalize_spaces, SPACE_CHARS};
pub use operations::run_operation;
pub use options::RunOptions;
pub use output::{
    LineProgress, OutputFormat, OutputFormatter, Progress, RunResult, SilentProgress,
};
pub use pattern::{build_pattern, MatchPattern, Mode, Substitution, HYPHEN_CHARS};
pub use safety::{check_target, classify_target, DangerousRoot};
pub use scanner::{find_matching_files, plan_renames, walk_files, Plan, RenamePlanEntry};
