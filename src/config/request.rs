//! The immutable parameters of one batch run

use std::path::{Path, PathBuf};

use crate::config::{validate_dimensions, BatchSettings, ImageFormat};
use crate::error::Result;

/// Suffix inserted between the original stem and the new extension
pub const OUTPUT_SUFFIX: &str = "_resized";

/// Everything a batch run needs, fixed for the run's duration
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub target_size: (u32, u32),
    pub target_format: ImageFormat,
    pub jpeg_quality: u8,
}

impl BatchRequest {
    /// Create a request with the default JPEG quality
    pub fn new<I, O>(
        input_path: I,
        output_path: O,
        target_size: (u32, u32),
        target_format: ImageFormat,
    ) -> Result<Self>
    where
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        validate_dimensions(target_size.0, target_size.1)?;
        Ok(Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            target_size,
            target_format,
            jpeg_quality: BatchSettings::default().jpeg_quality,
        })
    }

    /// Build the request for an input folder, nesting the output folder inside it
    pub fn from_settings<P: AsRef<Path>>(input_path: P, settings: &BatchSettings) -> Result<Self> {
        settings.validate()?;
        let input_path = input_path.as_ref();
        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_path: input_path.join(&settings.output_folder),
            target_size: settings.target_size(),
            target_format: settings.format,
            jpeg_quality: settings.jpeg_quality,
        })
    }

    /// Set the JPEG quality
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Output file name for an input file: `{stem}_resized.{format}`
    pub fn output_filename(&self, input_file: &Path) -> String {
        output_filename(input_file, self.target_format)
    }

    /// Full output path for an input file
    pub fn output_filepath(&self, input_file: &Path) -> PathBuf {
        self.output_path.join(self.output_filename(input_file))
    }
}

/// Derive the output file name from an input file name
///
/// Only the last extension is stripped, so `archive.tar.gz` keeps `archive.tar`,
/// and a leading dot does not start an extension.
pub fn output_filename(input_file: &Path, format: ImageFormat) -> String {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, format.extension())
}
