//! Process-level driver: stdin protocol, interactive mode and summaries.

pub(crate) mod interactive;

use std::error::Error;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use gamma::batch::{self, BatchError, LineReader, Mode};
use gamma::summary::GameSummary;
use gamma::{Board, OutOfMemory};

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BatchError> for CliError {
    fn from(e: BatchError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<OutOfMemory> for CliError {
    fn from(e: OutOfMemory) -> Self {
        Self::new(e.to_string())
    }
}

/// Play one game read from stdin.
///
/// # Errors
///
/// Returns an error on I/O failure, memory exhaustion or terminal failure.
pub(crate) fn execute(summary: Option<&Path>) -> Result<(), CliError> {
    let mut lines = LineReader::new(io::stdin().lock());
    let mut err = io::stderr().lock();

    let board = {
        let mut out = BufWriter::new(io::stdout().lock());
        let Some((mode, mut board)) = batch::read_setup(&mut lines, &mut out, &mut err)? else {
            out.flush()?;
            return Ok(());
        };

        match mode {
            Mode::Batch => {
                batch::run_batch(&mut board, &mut lines, &mut out, &mut err)?;
                board
            }
            Mode::Interactive => {
                out.flush()?;
                drop(out);
                interactive::execute(board)?
            }
        }
    };

    if let Some(path) = summary {
        write_summary(&board, path)?;
    }
    Ok(())
}

fn write_summary(board: &Board, path: &Path) -> Result<(), CliError> {
    GameSummary::from_board(board)?
        .write_json(path)
        .map_err(|e| CliError::new(format!("Failed to write {}: {e}", path.display())))
}
