//! Core image processing functionality

use std::fs;
use std::path::Path;

use image::io::Reader as ImageReader;
use image::DynamicImage;
use tracing::debug;

use crate::config::{BatchRequest, ImageFormat};
use crate::error::{BatchResizeError, Result};

pub mod formats;
pub mod resize;

pub use formats::*;
pub use resize::*;

/// What happened to one file
///
/// Failures that must stop the batch are returned as `Err` instead.
#[derive(Debug)]
pub enum ProcessingOutcome {
    /// The image was written under `output_filename`
    Resized { output_filename: String },
    /// The file could not be used as an image
    InvalidImage { cause: BatchResizeError },
}

impl ProcessingOutcome {
    pub fn is_resized(&self) -> bool {
        matches!(self, Self::Resized { .. })
    }
}

/// Decodes, resizes, and re-encodes single files
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    target_size: (u32, u32),
    format: ImageFormat,
    jpeg_quality: u8,
}

impl ImageProcessor {
    /// Create a processor
    pub fn new(target_size: (u32, u32), format: ImageFormat, jpeg_quality: u8) -> Self {
        Self {
            target_size,
            format,
            jpeg_quality,
        }
    }

    /// Create a processor with the settings of a batch request
    pub fn for_request(request: &BatchRequest) -> Self {
        Self::new(
            request.target_size,
            request.target_format,
            request.jpeg_quality,
        )
    }

    /// Process one file, turning recoverable failures into `InvalidImage`
    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<ProcessingOutcome> {
        debug!("Processing file: {:?} -> {:?}", input_path, output_path);

        match self.transform(input_path, output_path) {
            Ok(()) => Ok(ProcessingOutcome::Resized {
                output_filename: file_name(output_path),
            }),
            Err(cause) if cause.is_recoverable() => {
                Ok(ProcessingOutcome::InvalidImage { cause })
            }
            Err(cause) => Err(cause),
        }
    }

    fn transform(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        // The decoded image lives only for this call
        let image = load_image(input_path)?;
        let resized = resize_exact(&image, self.target_size);
        drop(image);

        let prepared = normalize_for_format(resized, self.format);
        let bytes = encode_image(&prepared, self.format, self.jpeg_quality)
            .map_err(|e| BatchResizeError::encode(output_path, e))?;

        save_bytes(output_path, &bytes)
    }

    pub fn target_size(&self) -> (u32, u32) {
        self.target_size
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// Open a file and decode it, detecting the format from its contents
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    debug!("Loading image: {:?}", path);

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| BatchResizeError::read(path, e))?;

    let image = reader
        .decode()
        .map_err(|e| BatchResizeError::decode(path, e))?;

    debug!(
        "Loaded image: {}x{} ({:?})",
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

/// Write encoded bytes
///
/// On failure a file this call created is removed again. An entry that was
/// already at `path` is left in place.
fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let existed = fs::symlink_metadata(path).is_ok();
    if let Err(e) = fs::write(path, bytes) {
        if !existed {
            let _ = fs::remove_file(path);
        }
        return Err(BatchResizeError::write(path, e));
    }

    debug!("Saved image: {:?} ({} bytes)", path, bytes.len());
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
