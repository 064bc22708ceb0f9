//! Configuration management for BatchResize

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BatchResizeError, Result};

pub mod request;
pub use request::*;

/// Largest accepted target dimension
pub const MAX_DIMENSION: u32 = 32768;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resize settings applied to every file in the batch
    pub batch: BatchSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Settings for one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Target width in pixels
    pub width: u32,

    /// Target height in pixels
    pub height: u32,

    /// Output codec
    pub format: ImageFormat,

    /// JPEG quality (1-100), ignored for other formats
    pub jpeg_quality: u8,

    /// Name of the output folder created inside the input folder
    pub output_folder: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            format: ImageFormat::Jpeg,
            jpeg_quality: 75,
            output_folder: "resized".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON logging
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Supported output formats
///
/// Config files may spell the identifier in any case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
}

impl ImageFormat {
    /// Canonical codec identifier
    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Tiff => "TIFF",
            Self::Bmp => "BMP",
        }
    }

    /// File extension used for outputs: the identifier in lowercase
    pub fn extension(self) -> String {
        self.name().to_lowercase()
    }

    /// JPEG cannot carry alpha, so pixels are forced to RGB before encoding
    pub fn requires_rgb(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageFormat {
    type Err = BatchResizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "JPEG" | "JPG" => Ok(Self::Jpeg),
            "PNG" => Ok(Self::Png),
            "GIF" => Ok(Self::Gif),
            "TIFF" | "TIF" => Ok(Self::Tiff),
            "BMP" => Ok(Self::Bmp),
            _ => Err(BatchResizeError::unsupported_format(s)),
        }
    }
}

impl TryFrom<String> for ImageFormat {
    type Error = BatchResizeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ImageFormat> for String {
    fn from(format: ImageFormat) -> Self {
        format.extension()
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            BatchResizeError::config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let config: Self = match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                return Err(BatchResizeError::config(
                    "Unsupported config file format. Use .toml or .yaml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.batch.validate()
    }
}

impl BatchSettings {
    /// Target size as (width, height)
    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Validate the batch settings
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;

        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(BatchResizeError::invalid_parameters(format!(
                "JPEG quality must be between 1-100, got {}",
                self.jpeg_quality
            )));
        }

        // The output folder always lives directly inside the input folder
        let mut components = Path::new(&self.output_folder).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(BatchResizeError::config(format!(
                "Output folder must be a plain folder name, got {:?}",
                self.output_folder
            ))),
        }
    }
}

/// Check a target size against the accepted range
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || width > MAX_DIMENSION || height == 0 || height > MAX_DIMENSION {
        return Err(BatchResizeError::invalid_parameters(format!(
            "Dimensions must be between 1-{}, got {}x{}",
            MAX_DIMENSION, width, height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.batch.target_size(), (800, 600));
        assert_eq!(config.batch.format, ImageFormat::Jpeg);
        assert_eq!(config.batch.output_folder, "resized");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_io() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.batch.width = 320;
        config.batch.format = ImageFormat::Png;

        let toml_path = dir.path().join("batchresize.toml");
        std::fs::write(&toml_path, toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::from_file(&toml_path).unwrap(), config);

        let yaml_path = dir.path().join("batchresize.yaml");
        std::fs::write(&yaml_path, serde_yaml::to_string(&config).unwrap()).unwrap();
        assert_eq!(Config::from_file(&yaml_path).unwrap(), config);
    }

    #[test]
    fn test_format_name_any_case() {
        for (name, expected) in [
            ("Jpeg", ImageFormat::Jpeg),
            ("jPeG", ImageFormat::Jpeg),
            ("jpg", ImageFormat::Jpeg),
            ("Png", ImageFormat::Png),
            ("Tiff", ImageFormat::Tiff),
            ("TIF", ImageFormat::Tiff),
            ("bmp", ImageFormat::Bmp),
        ] {
            let config: Config =
                toml::from_str(&format!("[batch]\nformat = \"{}\"\n", name)).unwrap();
            assert_eq!(config.batch.format, expected, "format {:?}", name);
        }

        let yaml: Config = serde_yaml::from_str("batch:\n  format: Gif\n").unwrap();
        assert_eq!(yaml.batch.format, ImageFormat::Gif);
    }

    #[test]
    fn test_unknown_format_name_rejected() {
        assert!(toml::from_str::<Config>("[batch]\nformat = \"webp\"\n").is_err());
    }

    #[test]
    fn test_format_serializes_lowercase() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("format = \"jpeg\""), "{}", text);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[batch]\nformat = \"JPEG\"\nheight = 300\n").unwrap();
        assert_eq!(config.batch.target_size(), (800, 300));
        assert_eq!(config.batch.format, ImageFormat::Jpeg);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_unknown_config_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        std::fs::write(&path, "width = 1").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(BatchResizeError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = BatchSettings::default();
        settings.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = BatchSettings::default();
        settings.jpeg_quality = 101;
        assert!(settings.validate().is_err());

        for folder in ["", "a/b", "..", "/abs"] {
            let mut settings = BatchSettings::default();
            settings.output_folder = folder.to_string();
            assert!(settings.validate().is_err(), "accepted {:?}", folder);
        }
    }

    #[test]
    fn test_image_format_parsing() {
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("jpeg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("Jpg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("tif".parse::<ImageFormat>().unwrap(), ImageFormat::Tiff);
        assert!("xyz".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_image_format_properties() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpeg");
        assert_eq!(ImageFormat::Tiff.extension(), "tiff");
        assert!(ImageFormat::Jpeg.requires_rgb());
        assert!(!ImageFormat::Png.requires_rgb());
        assert_eq!(ImageFormat::Bmp.to_string(), "BMP");
    }
}
