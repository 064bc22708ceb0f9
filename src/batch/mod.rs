//! Batch traversal: list a folder, process every regular file, isolate failures

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::BatchRequest;
use crate::error::{BatchResizeError, Result};
use crate::processing::{ImageProcessor, ProcessingOutcome};

pub mod progress;
pub use progress::*;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every candidate was resized or skipped
    Completed(BatchReport),
    InputNotFound,
    InputNotADirectory,
    /// The input folder holds no regular files
    NoImagesFound,
}

/// Counts for a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub resized: usize,
    pub skipped: usize,
}

/// Contents of the input folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputListing {
    /// Regular files directly inside the folder, sorted by name
    Files(Vec<PathBuf>),
    Missing,
    NotADirectory,
}

/// Runs batches and reports progress to a sink
pub struct BatchResizer<S: ProgressSink> {
    sink: S,
}

impl<S: ProgressSink> BatchResizer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Report a missing or non-folder input before any output is created
    ///
    /// Returns the terminal status when the input cannot be batched.
    pub fn preflight(&mut self, input_path: &Path) -> Result<Option<BatchStatus>> {
        match list_candidates(input_path)? {
            InputListing::Files(_) => Ok(None),
            InputListing::Missing => self.input_not_found(input_path).map(Some),
            InputListing::NotADirectory => self.input_not_a_directory(input_path).map(Some),
        }
    }

    /// Resize every regular file in the input folder
    ///
    /// Setup problems and invalid files are reported through the sink; only
    /// fatal errors come back as `Err`, leaving earlier outputs in place.
    pub fn run(&mut self, request: &BatchRequest) -> Result<BatchStatus> {
        info!("Input: {:?}", request.input_path);
        info!("Output: {:?}", request.output_path);

        ensure_output_dir(&request.output_path)?;

        let candidates = match list_candidates(&request.input_path)? {
            InputListing::Files(files) => files,
            InputListing::Missing => return self.input_not_found(&request.input_path),
            InputListing::NotADirectory => {
                return self.input_not_a_directory(&request.input_path)
            }
        };

        if candidates.is_empty() {
            self.sink.emit(ProgressEvent::NoImagesFound {
                path: request.input_path.clone(),
            })?;
            return Ok(BatchStatus::NoImagesFound);
        }

        info!(
            "Found {} files to process ({}x{} {})",
            candidates.len(),
            request.target_size.0,
            request.target_size.1,
            request.target_format
        );

        let processor = ImageProcessor::for_request(request);
        let mut report = BatchReport {
            total: candidates.len(),
            ..BatchReport::default()
        };

        for (index, input_file) in candidates.iter().enumerate() {
            let filename = display_name(input_file);
            let output_file = request.output_filepath(input_file);

            match processor.process_file(input_file, &output_file)? {
                ProcessingOutcome::Resized { output_filename } => {
                    report.resized += 1;
                    self.sink.emit(ProgressEvent::Resized {
                        index: index + 1,
                        total: report.total,
                        filename,
                        output_filename,
                    })?;
                }
                ProcessingOutcome::InvalidImage { cause } => {
                    info!("Skipping {:?}: {}", input_file, cause);
                    report.skipped += 1;
                    self.sink.emit(ProgressEvent::Skipped { filename })?;
                }
            }
        }

        info!(
            "Batch finished: {} resized, {} skipped",
            report.resized, report.skipped
        );

        Ok(BatchStatus::Completed(report))
    }

    fn input_not_found(&mut self, path: &Path) -> Result<BatchStatus> {
        self.sink.emit(ProgressEvent::InputNotFound {
            path: path.to_path_buf(),
        })?;
        Ok(BatchStatus::InputNotFound)
    }

    fn input_not_a_directory(&mut self, path: &Path) -> Result<BatchStatus> {
        self.sink.emit(ProgressEvent::InputNotADirectory {
            path: path.to_path_buf(),
        })?;
        Ok(BatchStatus::InputNotADirectory)
    }
}

/// Create the output folder and its parents unless it already exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    debug!("Creating output folder: {:?}", path);
    fs::create_dir_all(path).map_err(|source| BatchResizeError::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// List the regular files directly inside `input_path`
///
/// Subfolders and special files are left out, symlinks to regular files are kept.
pub fn list_candidates(input_path: &Path) -> Result<InputListing> {
    let list_error = |source: io::Error| BatchResizeError::ListInput {
        path: input_path.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(input_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(InputListing::Missing),
        Err(e) if e.kind() == io::ErrorKind::NotADirectory || input_path.is_file() => {
            return Ok(InputListing::NotADirectory)
        }
        Err(e) => return Err(list_error(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Ignoring non-file entry: {:?}", path);
        }
    }

    // Sort files for consistent processing order
    files.sort();
    Ok(InputListing::Files(files))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
