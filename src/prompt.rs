//! Yes/no confirmation on the console

#[cfg(test)]
use mockall::automock;

use std::io::{BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("unknown input: {0}")]
    UnknownInput(String),

    #[error("no answer on stdin")]
    NoInput,

    #[error("Failed to read answer")]
    Io(#[from] std::io::Error),
}

/// Capability to ask the user before a file is modified
#[cfg_attr(test, automock)]
pub trait Confirm {
    /// Asks `prompt`; an empty answer picks `default_yes`
    fn ask_yes_no(&self, prompt: &str, default_yes: bool) -> Result<bool, PromptError>;
}

/// Asks on stdout and reads the answer from stdin
pub struct ConsolePrompt;

impl Confirm for ConsolePrompt {
    fn ask_yes_no(&self, prompt: &str, default_yes: bool) -> Result<bool, PromptError> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        ask_with(&mut stdin.lock(), &mut stdout, prompt, default_yes)
    }
}

/// Writes the question to `output` and parses one line from `input`
pub fn ask_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default_yes: bool,
) -> Result<bool, PromptError> {
    let choices = if default_yes { "Y/n" } else { "y/N" };
    write!(output, "{prompt} [{choices}] ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::NoInput);
    }
    parse_answer(&line, default_yes)
}

/// Parses an answer case-insensitively: y/yes, n/no, or empty for the default
pub fn parse_answer(answer: &str, default_yes: bool) -> Result<bool, PromptError> {
    let answer = answer.trim_end_matches(['\n', '\r']).to_lowercase();
    match answer.as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        "" => Ok(default_yes),
        _ => Err(PromptError::UnknownInput(answer)),
    }
}
