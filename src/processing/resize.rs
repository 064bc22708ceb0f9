//! Resampling and colour-mode normalisation

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

use crate::config::ImageFormat;

/// Bicubic resampling for every resize
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Resize to exactly the target dimensions
///
/// The aspect ratio is not preserved; sources with a different ratio are stretched.
pub fn resize_exact(image: &DynamicImage, target_size: (u32, u32)) -> DynamicImage {
    let (target_width, target_height) = target_size;

    debug!(
        "Resizing {}x{} -> {}x{} using {:?}",
        image.width(),
        image.height(),
        target_width,
        target_height,
        RESIZE_FILTER
    );

    // Check if resize is needed
    if target_width == image.width() && target_height == image.height() {
        return image.clone();
    }

    image.resize_exact(target_width, target_height, RESIZE_FILTER)
}

/// Convert the pixel layout to one the target codec can store
///
/// JPEG always gets 8-bit RGB, whatever the source mode; other formats keep
/// the decoded mode untouched.
pub fn normalize_for_format(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    if format.requires_rgb() {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgba, RgbaImage};

    fn rgba(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128])))
    }

    #[test]
    fn test_resize_stretches_to_exact_size() {
        let resized = resize_exact(&rgba(100, 100), (80, 20));
        assert_eq!((resized.width(), resized.height()), (80, 20));
    }

    #[test]
    fn test_resize_upscales() {
        let resized = resize_exact(&rgba(3, 2), (800, 600));
        assert_eq!((resized.width(), resized.height()), (800, 600));
    }

    #[test]
    fn test_same_size_is_untouched() {
        let original = rgba(8, 6);
        let resized = resize_exact(&original, (8, 6));
        assert_eq!(resized.as_bytes(), original.as_bytes());
    }

    #[test]
    fn test_jpeg_strips_alpha() {
        let normalized = normalize_for_format(rgba(4, 4), ImageFormat::Jpeg);
        assert_eq!(normalized.color(), ColorType::Rgb8);

        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(4, 4));
        assert_eq!(
            normalize_for_format(gray, ImageFormat::Jpeg).color(),
            ColorType::Rgb8
        );
    }

    #[test]
    fn test_other_formats_keep_mode() {
        let normalized = normalize_for_format(rgba(4, 4), ImageFormat::Png);
        assert_eq!(normalized.color(), ColorType::Rgba8);
    }
}
