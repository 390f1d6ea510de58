//! Operator confirmation before setup polls for updates.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Blocks until the operator says to continue.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> Result<()>;
}

/// Prints the message to stdout and waits for one line on stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> Result<()> {
        let stdout = io::stdout();
        let stdin = io::stdin();
        wait_for_line(message, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// EOF counts as confirmation, like pressing Enter.
fn wait_for_line<R: BufRead, W: Write>(message: &str, input: &mut R, output: &mut W) -> Result<()> {
    writeln!(output, "🔄 {}", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
