//! Progress events and where they are reported

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// One user-visible progress message
///
/// The `Display` form is the exact console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    InputNotFound {
        path: PathBuf,
    },
    InputNotADirectory {
        path: PathBuf,
    },
    NoImagesFound {
        path: PathBuf,
    },
    Resized {
        index: usize,
        total: usize,
        filename: String,
        output_filename: String,
    },
    Skipped {
        filename: String,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path } => write!(
                f,
                "Error: The folder '{}' was not found. Please check the path and try again.",
                path.display()
            ),
            Self::InputNotADirectory { path } => write!(
                f,
                "Error: The path '{}' is a file, not a folder. Please enter a folder path.",
                path.display()
            ),
            Self::NoImagesFound { path } => {
                write!(f, "No image files found in '{}'.", path.display())
            }
            Self::Resized {
                index,
                total,
                filename,
                output_filename,
            } => write!(
                f,
                "({}/{}) Resized {} -> {}",
                index, total, filename, output_filename
            ),
            Self::Skipped { filename } => {
                write!(f, "Skipping {}: Not a valid image file.", filename)
            }
        }
    }
}

/// Receives progress events as the batch runs
pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent) -> io::Result<()>;
}

/// Collects events in memory
impl ProgressSink for Vec<ProgressEvent> {
    fn emit(&mut self, event: ProgressEvent) -> io::Result<()> {
        self.push(event);
        Ok(())
    }
}

/// Writes each event as one line
pub struct ConsoleReporter<W: Write> {
    writer: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressSink for ConsoleReporter<W> {
    fn emit(&mut self, event: ProgressEvent) -> io::Result<()> {
        writeln!(self.writer, "{}", event)?;
        self.writer.flush()
    }
}
