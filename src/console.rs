use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::WizardError;

/// Line-oriented interaction with the user.
pub trait Console {
    /// Ask a question and return the answer without its line terminator.
    fn prompt(&mut self, message: &str) -> Result<String, WizardError>;

    fn say(&mut self, message: &str);
}

/// The process's own terminal (or piped stdin when not attached to one).
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn prompt(&mut self, message: &str) -> Result<String, WizardError> {
        if io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error);
        }

        print!("{message}: ");
        io::stdout().flush().map_err(WizardError::Prompt)?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(read_error)?;
        if read == 0 {
            return Err(WizardError::InputClosed);
        }
        Ok(strip_line_ending(&line).to_string())
    }

    fn say(&mut self, message: &str) {
        println!("{message}");
    }
}

fn prompt_error(err: dialoguer::Error) -> WizardError {
    match err {
        dialoguer::Error::IO(e) => read_error(e),
    }
}

fn read_error(err: io::Error) -> WizardError {
    match err.kind() {
        io::ErrorKind::Interrupted => WizardError::Cancelled,
        io::ErrorKind::UnexpectedEof => WizardError::InputClosed,
        _ => WizardError::Prompt(err),
    }
}

pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// Console fed from a fixed list of answers, recording everything shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn prompt(&mut self, message: &str) -> Result<String, WizardError> {
        self.prompts.push(message.to_string());
        self.answers.pop_front().ok_or(WizardError::InputClosed)
    }

    fn say(&mut self, message: &str) {
        self.output.push(message.to_string());
    }
}
