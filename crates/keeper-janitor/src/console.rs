//! Operator collaborator backed by a line-oriented console

use keeper_domain::traits::Operator;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Console operator reading answers from `input` and writing to `output`
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl ConsoleOperator<StdinLock<'static>, Stdout> {
    /// Operator attached to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    /// Create an operator over arbitrary input and output streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Recover the underlying streams
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    type Error = io::Error;

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            tracing::warn!(error = %e, "Failed to write console output");
        }
    }

    fn prompt(&mut self, question: &str) -> Result<String, Self::Error> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        // EOF yields an empty answer, which reads as "no"
        let mut response = String::new();
        self.input.read_line(&mut response)?;
        Ok(response)
    }
}
