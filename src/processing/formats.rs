//! Output format handling

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat};

use crate::config::ImageFormat;

/// Convert our ImageFormat to image crate format
impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Encoder settings for a target format
pub fn output_format(format: ImageFormat, jpeg_quality: u8) -> ImageOutputFormat {
    match format {
        ImageFormat::Jpeg => ImageOutputFormat::Jpeg(jpeg_quality.clamp(1, 100)),
        other => image::ImageFormat::from(other).into(),
    }
}

/// Encode an image fully in memory
///
/// Nothing touches the filesystem here, so a codec failure cannot leave a
/// truncated output file behind.
pub fn encode_image(
    image: &DynamicImage,
    format: ImageFormat,
    jpeg_quality: u8,
) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, output_format(format, jpeg_quality))?;
    Ok(buffer.into_inner())
}
