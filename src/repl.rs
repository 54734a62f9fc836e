//! The read-eval-print loop.
//!
//! Each line is either a meta-command (starts with `.`) or a statement. Every
//! error short of a failed read or write is printed and the loop carries on;
//! only `.exit` ends it successfully.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::error::{ReplError, Result};
use crate::executor::{self, ExecuteOutcome};
use crate::layout::Layout;
use crate::statement::Statement;
use crate::table::Table;

const PROMPT: &str = "(.) > ";

struct InputBuffer<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> InputBuffer<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Reads the next line, stripped of its line terminator.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
    /// garbled line is handled like any other malformed input.
    fn read_input(&mut self) -> Result<Cow<'_, str>> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => Err(ReplError::InputClosed),
            Ok(_) => {
                let line = self.buffer.strip_suffix(b"\n").unwrap_or(&self.buffer[..]);
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                Ok(String::from_utf8_lossy(line))
            }
            Err(err) => Err(ReplError::ReadInput(err)),
        }
    }
}

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    /// Returns `None` if `input` is not a meta-command at all.
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized),
            _ => None,
        }
    }
}

/// What the loop does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl<R, W> {
    input: InputBuffer<R>,
    output: W,
    table: Table,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(reader: R, output: W, layout: Layout) -> Self {
        Self {
            input: InputBuffer::new(reader),
            output,
            table: Table::new(layout),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Runs until `.exit`, the end of input, or an I/O error.
    ///
    /// The table is released when this returns, whichever way it ends.
    pub fn run(mut self) -> Result<()> {
        loop {
            self.print_prompt()?;
            let line = match self.input.read_input() {
                Ok(line) => line.into_owned(),
                Err(err) => {
                    warn!(error = %err, "stopping");
                    return Err(err);
                }
            };

            if self.handle_line(&line)? == Flow::Exit {
                debug!(num_rows = self.table.num_rows(), "exit requested");
                return Ok(());
            }
        }
    }

    /// Handles a single line and renders its outcome.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if let Some(meta) = MetaCommand::parse(line) {
            return match meta {
                MetaCommand::Exit => Ok(Flow::Exit),
                MetaCommand::Unrecognized => {
                    writeln!(self.output, "Unrecognized command: '{line}'")?;
                    Ok(Flow::Continue)
                }
            };
        }

        let statement = match Statement::prepare(line) {
            Ok(statement) => statement,
            Err(err) => {
                debug!(error = ?err, "rejected statement");
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match executor::execute(statement, &mut self.table) {
            Ok(ExecuteOutcome::Inserted) => writeln!(self.output, "Executed.")?,
            Ok(ExecuteOutcome::Rows(rows)) => {
                for row in &rows {
                    writeln!(self.output, "{row}")?;
                }
                writeln!(self.output, "Executed.")?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn print_prompt(&mut self) -> Result<()> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;
        Ok(())
    }
}
