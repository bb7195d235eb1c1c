use anyhow::Result;
use namescrub_core::{
    run_operation, LineProgress, Mode, OutputFormatter, Progress, RunError, RunOptions,
    SilentProgress,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::prompt::{expand_tilde, Prompter};

/// Everything the pipeline needs, after prompting for missing values.
#[derive(Debug)]
pub struct RunInputs {
    pub target: PathBuf,
    pub phrase: String,
    pub options: RunOptions,
}

/// Fill in missing target, phrase, mode and replacement through `prompter`.
pub fn collect_inputs<R: BufRead, W: Write>(
    cli: &Cli,
    prompter: &mut Prompter<R, W>,
) -> Result<RunInputs> {
    let target = match &cli.target {
        Some(target) => expand_tilde(&target.to_string_lossy()),
        None => prompter.directory()?,
    };

    let phrase = match cli.phrase.as_deref().filter(|phrase| !phrase.is_empty()) {
        Some(phrase) => phrase.to_string(),
        None => prompter.phrase()?,
    };

    let mode = match cli.mode {
        Some(mode) => mode.into(),
        None => prompter.mode()?,
    };

    let replacement = match (mode, &cli.replacement) {
        (Mode::Replace, None) => Some(prompter.replacement()?),
        (_, replacement) => replacement.clone(),
    };

    Ok(RunInputs {
        target,
        phrase,
        options: RunOptions {
            mode,
            replacement,
            ignore_case: cli.ignore_case,
            loose: cli.loose,
            recursive: cli.recursive,
            apply: cli.apply,
            force: cli.force,
            list_matches: cli.list_matches,
        },
    })
}

pub fn handle_run(cli: &Cli, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());
    let inputs = collect_inputs(cli, &mut prompter)?;
    tracing::debug!(?inputs, "collected run inputs");

    let home = dirs::home_dir();
    let stdout = io::stdout();

    let result = match cli.output {
        OutputFormat::Json => run_with(&inputs, home.as_deref(), &mut SilentProgress)?,
        OutputFormat::Summary => {
            let mut progress = LineProgress::new(stdout.lock(), use_color);
            run_with(&inputs, home.as_deref(), &mut progress)?
        },
    };

    let formatted = result.format(cli.output.into());
    write_result(&mut stdout.lock(), &formatted, cli.output)?;
    Ok(())
}

/// Print the final summary or JSON. Write failures exit like other output errors.
fn write_result<W: Write>(
    out: &mut W,
    formatted: &str,
    format: OutputFormat,
) -> Result<(), RunError> {
    if format == OutputFormat::Json {
        writeln!(out, "{formatted}")?;
    } else {
        write!(out, "{formatted}")?;
    }
    out.flush()?;
    Ok(())
}

fn run_with(
    inputs: &RunInputs,
    home: Option<&std::path::Path>,
    progress: &mut dyn Progress,
) -> Result<namescrub_core::RunResult> {
    Ok(run_operation(
        &inputs.target,
        &inputs.phrase,
        &inputs.options,
        home,
        progress,
    )?)
}
