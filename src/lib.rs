//! BatchResize - resize a folder of images in one pass
//!
//! Every regular file directly inside an input folder is decoded, resized to a
//! fixed resolution, re-encoded in a target format and written to an output
//! folder. Files that are not valid images are reported and skipped; they
//! never stop the rest of the batch.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use batchresize::{BatchRequest, BatchResizer, ConsoleReporter, ImageFormat};
//!
//! let request = BatchRequest::new("photos", "photos/resized", (800, 600), ImageFormat::Jpeg)?;
//! let mut resizer = BatchResizer::new(ConsoleReporter::stdout());
//! let status = resizer.run(&request)?;
//! println!("{:?}", status);
//! # Ok::<(), batchresize::BatchResizeError>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod config;
pub mod error;
pub mod processing;

// Re-export commonly used types
pub use batch::{BatchReport, BatchResizer, BatchStatus, ConsoleReporter, ProgressEvent, ProgressSink};
pub use config::{BatchRequest, BatchSettings, Config, ImageFormat, LoggingConfig};
pub use error::{BatchResizeError, Result};
pub use processing::{ImageProcessor, ProcessingOutcome};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout only carries progress lines. `RUST_LOG`
/// overrides `default_level`. Calling this more than once is harmless.
pub fn init_logging(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!("BatchResize v{} initialized", VERSION);
    }
}
