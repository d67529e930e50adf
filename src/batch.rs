//! Line protocol driving a [`Board`].
//!
//! Input is consumed one line at a time. Before a game exists only the
//! initial line `B|I width height players areas` is understood; once a batch
//! game is running each line is one [`Command`]. Malformed lines are
//! answered with `ERROR <line>` on the error stream and otherwise ignored.
//!
//! The runner is generic over [`BufRead`] and [`Write`] so the whole
//! protocol can be exercised in memory.

pub mod parser;

pub use parser::{Command, Mode, parse_command, parse_initial};

use std::fmt;
use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::error::OutOfMemory;
use crate::game::Board;
use parser::is_skippable;

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: u64,
    /// Line text including the trailing newline, if any.
    pub text: String,
    /// Whether the line ended with `\n` rather than at end of input.
    pub terminated: bool,
}

/// Numbered line iterator over a reader.
///
/// Invalid UTF-8 is replaced rather than rejected; such lines fail to parse
/// like any other malformed input.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    number: u64,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a reader.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            number: 0,
            buf: Vec::new(),
        }
    }

    /// Number of the last line returned.
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.number
    }

    /// Read the next line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates read errors.
    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;

        let terminated = self.buf.last() == Some(&b'\n');
        Ok(Some(Line {
            number: self.number,
            text: String::from_utf8_lossy(&self.buf).into_owned(),
            terminated,
        }))
    }
}

/// Fatal failure of a protocol session.
#[derive(Debug)]
pub enum BatchError {
    /// Reading input or writing output failed.
    Io(io::Error),
    /// The engine ran out of memory while executing a command.
    OutOfMemory {
        /// Line of the command that failed.
        line: u64,
    },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OutOfMemory { line } => write!(f, "{OutOfMemory} at line {line}"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::OutOfMemory { .. } => None,
        }
    }
}

impl From<io::Error> for BatchError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn report_error<W: Write>(err: &mut W, line: u64) -> io::Result<()> {
    writeln!(err, "ERROR {line}")
}

/// Outcome of reading a line that may carry a command.
enum Next {
    /// A line worth parsing.
    Line(Line),
    /// A comment or blank line.
    Skip,
    /// End of input.
    End,
}

fn next_meaningful<R: BufRead, E: Write>(
    lines: &mut LineReader<R>,
    err: &mut E,
) -> Result<Next, BatchError> {
    let Some(line) = lines.next_line()? else {
        return Ok(Next::End);
    };

    if !line.terminated {
        // Input ended mid-line.
        if !line.text.starts_with('#') {
            report_error(err, line.number)?;
        }
        return Ok(Next::End);
    }
    if is_skippable(&line.text) {
        return Ok(Next::Skip);
    }
    Ok(Next::Line(line))
}

/// Read input until a game is successfully started.
///
/// Prints `OK <line>` when a batch game starts. Returns `None` if the input
/// ends before any valid initial line.
///
/// # Errors
///
/// Returns [`BatchError::Io`] if reading or writing fails.
pub fn read_setup<R: BufRead, W: Write, E: Write>(
    lines: &mut LineReader<R>,
    out: &mut W,
    err: &mut E,
) -> Result<Option<(Mode, Board)>, BatchError> {
    loop {
        let line = match next_meaningful(lines, err)? {
            Next::Line(line) => line,
            Next::Skip => continue,
            Next::End => return Ok(None),
        };

        let Some((mode, config)) = parse_initial(&line.text) else {
            report_error(err, line.number)?;
            continue;
        };

        let board = match Board::new(config) {
            Ok(board) => board,
            Err(e) => {
                debug!("line {}: {e}", line.number);
                report_error(err, line.number)?;
                continue;
            }
        };

        if mode == Mode::Batch {
            writeln!(out, "OK {}", line.number)?;
        }
        info!("line {}: starting {mode:?} game", line.number);
        return Ok(Some((mode, board)));
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Execute one command, writing its answer.
///
/// # Errors
///
/// Returns [`BatchError::OutOfMemory`] if a move or golden-move query ran out of memory.
pub fn execute<W: Write, E: Write>(
    board: &mut Board,
    command: Command,
    line: u64,
    out: &mut W,
    err: &mut E,
) -> Result<(), BatchError> {
    let fatal = |_: OutOfMemory| BatchError::OutOfMemory { line };

    match command {
        Command::Move { player, x, y } => {
            let applied = board.try_move(player, x, y).map_err(fatal)?;
            writeln!(out, "{}", flag(applied))?;
        }
        Command::GoldenMove { player, x, y } => {
            let applied = board.try_golden_move(player, x, y).map_err(fatal)?;
            writeln!(out, "{}", flag(applied))?;
        }
        Command::BusyFields { player } => writeln!(out, "{}", board.busy_fields(player))?,
        Command::FreeFields { player } => writeln!(out, "{}", board.free_fields(player))?,
        Command::GoldenPossible { player } => {
            let possible = board.golden_possible(player).map_err(fatal)?;
            writeln!(out, "{}", flag(possible))?;
        }
        Command::Print => match board.render() {
            Ok(text) => out.write_all(text.as_bytes())?,
            // Not fatal: the board itself is intact.
            Err(_) => report_error(err, line)?,
        },
    }

    Ok(())
}

/// Run batch commands against `board` until the input ends.
///
/// # Errors
///
/// Returns [`BatchError`] on I/O failure or when the engine runs out of
/// memory; no further lines are processed.
pub fn run_batch<R: BufRead, W: Write, E: Write>(
    board: &mut Board,
    lines: &mut LineReader<R>,
    out: &mut W,
    err: &mut E,
) -> Result<(), BatchError> {
    loop {
        let line = match next_meaningful(lines, err)? {
            Next::Line(line) => line,
            Next::Skip => continue,
            Next::End => break,
        };

        match parse_command(&line.text) {
            Some(command) => execute(board, command, line.number, out, err)?,
            None => report_error(err, line.number)?,
        }
    }

    out.flush()?;
    err.flush()?;
    info!("batch input ended after {} lines", lines.line_number());
    Ok(())
}
