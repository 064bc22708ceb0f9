//! Error types and handling for BatchResize

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for BatchResize operations
pub type Result<T> = std::result::Result<T, BatchResizeError>;

/// Main error type for BatchResize operations
#[derive(Debug, Error)]
pub enum BatchResizeError {
    /// I/O errors outside of any single image (console, prompt)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// The output folder could not be created
    #[error("Failed to create output folder {path:?}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input folder exists but could not be listed
    #[error("Failed to list input folder {path:?}: {source}")]
    ListInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file could not be opened or read
    #[error("Failed to read {file:?}: {source}")]
    ReadError {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file is not a decodable image
    #[error("Failed to decode {file:?}: {source}")]
    DecodeError {
        file: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The resized image could not be encoded in the target format
    #[error("Failed to encode {file:?}: {source}")]
    EncodeError {
        file: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The encoded image could not be written to disk
    #[error("Failed to write {file:?}: {source}")]
    WriteError {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The codec ran out of memory
    #[error("Memory allocation failed: {message} (file: {file:?})")]
    OutOfMemory { message: String, file: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Target format identifier not recognised
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    /// Invalid resize parameters
    #[error("Invalid resize parameters: {message}")]
    InvalidParameters { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    SerdeError(String),
}

impl BatchResizeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a new invalid parameters error
    pub fn invalid_parameters<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Classify an I/O failure while reading an input file
    pub fn read(file: &Path, source: io::Error) -> Self {
        Self::ReadError {
            file: file.to_path_buf(),
            source,
        }
    }

    /// Classify a codec failure while decoding an input file
    pub fn decode(file: &Path, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(source) => Self::read(file, source),
            source if is_out_of_memory(&source) => Self::OutOfMemory {
                message: source.to_string(),
                file: file.to_path_buf(),
            },
            source => Self::DecodeError {
                file: file.to_path_buf(),
                source,
            },
        }
    }

    /// Classify a codec failure while encoding an output image
    pub fn encode(file: &Path, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(source) => Self::write(file, source),
            source if is_out_of_memory(&source) => Self::OutOfMemory {
                message: source.to_string(),
                file: file.to_path_buf(),
            },
            source => Self::EncodeError {
                file: file.to_path_buf(),
                source,
            },
        }
    }

    /// Classify an I/O failure while writing an output file
    pub fn write(file: &Path, source: io::Error) -> Self {
        Self::WriteError {
            file: file.to_path_buf(),
            source,
        }
    }

    /// Check if this error is recoverable (the batch can skip the file and continue)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The file is not a usable image
            Self::ReadError { .. }
            | Self::DecodeError { .. }
            | Self::EncodeError { .. } => true,

            // Generic write failures count as a bad file, resource failures do not
            Self::WriteError { source, .. } => !is_resource_failure(source),

            Self::IoError(_)
            | Self::CreateOutputDir { .. }
            | Self::ListInput { .. }
            | Self::OutOfMemory { .. }
            | Self::ConfigError { .. }
            | Self::UnsupportedFormat { .. }
            | Self::InvalidParameters { .. }
            | Self::SerdeError(_) => false,
        }
    }
}

fn is_out_of_memory(err: &image::ImageError) -> bool {
    matches!(
        err,
        image::ImageError::Limits(limit)
            if matches!(limit.kind(), image::error::LimitErrorKind::InsufficientMemory)
    )
}

/// Write failures that signal a problem with the machine rather than the file
fn is_resource_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied
            | io::ErrorKind::StorageFull
            | io::ErrorKind::ReadOnlyFilesystem
            | io::ErrorKind::OutOfMemory
    )
}

// Convert serde errors to our error type
impl From<toml::de::Error> for BatchResizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::SerdeError(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for BatchResizeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerdeError(format!("YAML parsing error: {}", err))
    }
}
