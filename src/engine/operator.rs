//! Line-oriented prompt/response channel between the engine and the operator.
//!
//! Everything the engine shows or asks goes through [`Operator`], so runs can
//! be scripted in tests with in-memory readers and writers.
use super::RecipeError;
use std::fmt;
use std::io::{BufRead, Write};

/// Severity tag for one-line engine messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
    Suggest,
    Note,
    Tips,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Suggest => "SUGGEST",
            Level::Note => "NOTE",
            Level::Tips => "TIPS",
        };
        f.write_str(label)
    }
}

pub fn leveled(level: Level, msg: &str) -> String {
    format!("{level}: {msg}")
}

/// Append the traceability ref to a question when one is present.
pub fn format_query(query: &str, reference: &str) -> String {
    if reference.is_empty() {
        query.to_string()
    } else {
        format!("{query} [ref: {reference}]")
    }
}

pub trait Operator {
    /// Ask one question and return the answer line without its line ending.
    fn ask(&mut self, question: &str) -> Result<String, RecipeError>;

    /// Show one line to the operator.
    fn say(&mut self, line: &str) -> Result<(), RecipeError>;

    fn report(&mut self, level: Level, msg: &str) -> Result<(), RecipeError> {
        self.say(&leveled(level, msg))
    }
}

/// Operator backed by a reader for answers and a writer for everything shown.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn ask(&mut self, question: &str) -> Result<String, RecipeError> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RecipeError::InputClosed);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn say(&mut self, line: &str) -> Result<(), RecipeError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}
