use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::debug;

use super::Dialogs;
use crate::error::Result;

/// Line-oriented terminal: commands and dialog answers share one input stream.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn println(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

impl<R: BufRead, W: Write> Dialogs for Terminal<R, W> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{} {}", "!".yellow().bold(), message) {
            debug!(error = %e, message, "could not write alert");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        let question = format!("{} {} [y/N] ", "?".cyan().bold(), message);
        match self.prompt(&question) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
