use anyhow::{bail, Result};
use namescrub_core::Mode;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Asks for the inputs that were not given on the command line.
///
/// Questions go to `output`, answers come from `input` one line at a time.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Raw answer without the line ending. End of input is an error.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("no input available while prompting: {}", question.trim_end());
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Keeps asking until the answer is an existing directory.
    pub fn directory(&mut self) -> Result<PathBuf> {
        loop {
            let answer = self.ask("Enter the directory to scan: ")?;
            let path = expand_tilde(answer.trim());
            if path.is_dir() {
                return Ok(path);
            }
            self.say(&format!("Not a valid directory: {}", path.display()))?;
        }
    }

    /// Keeps asking until the phrase is non-empty.
    pub fn phrase(&mut self) -> Result<String> {
        loop {
            let answer = self.ask("Enter the phrase to delete/replace (e.g., (Source-Library)): ")?;
            let phrase = answer.trim();
            if !phrase.is_empty() {
                return Ok(phrase.to_string());
            }
            self.say("Phrase cannot be empty.")?;
        }
    }

    /// Empty answer means delete.
    pub fn mode(&mut self) -> Result<Mode> {
        let mut answer = self.ask("Mode? delete or replace [delete]: ")?;
        loop {
            match answer.trim().to_lowercase().as_str() {
                "" | "delete" => return Ok(Mode::Delete),
                "replace" => return Ok(Mode::Replace),
                _ => answer = self.ask("Please type 'delete' or 'replace': ")?,
            }
        }
    }

    /// Any text, including none at all.
    pub fn replacement(&mut self) -> Result<String> {
        self.ask("Enter replacement text: ")
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(input: &str) -> PathBuf {
    expand_tilde_with(input, dirs::home_dir().as_deref())
}

fn expand_tilde_with(input: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(input);
    };
    if input == "~" {
        return home.to_path_buf();
    }
    match input.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(input),
    }
}
