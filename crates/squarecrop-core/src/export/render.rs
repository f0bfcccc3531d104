//! Sampling a crop out of the decoded source and scaling it to output size.

use image::imageops;

use super::{ExportError, ExportItem};
use crate::decode::{DecodedImage, FilterType};
use crate::encode::encode_png;
use crate::geometry::{CropRect, PixelRect};

/// Render the `rect` region of `image` at `width × height`.
///
/// # Arguments
///
/// * `image` - Upright source pixels
/// * `rect` - Crop rectangle in source pixels; rounded and clamped to the image
/// * `width`, `height` - Output size in pixels
/// * `filter` - Resampling filter
///
/// # Errors
///
/// Returns `ExportError::InvalidOutputSize` for a zero output dimension and
/// `ExportError::InvalidImage` if the source buffer is inconsistent.
pub fn render_crop(
    image: &DecodedImage,
    rect: &CropRect,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, ExportError> {
    let source = rect.to_pixel_rect(image.dimensions());
    sample(image, source, width, height, filter)
}

/// Render one planned item and encode it as PNG.
///
/// # Errors
///
/// Same as [`render_crop`], plus `ExportError::Encode` if PNG encoding fails.
pub fn export_crop(
    image: &DecodedImage,
    item: &ExportItem,
    filter: FilterType,
) -> Result<Vec<u8>, ExportError> {
    let rendered = sample(image, item.source, item.width, item.height, filter)?;
    let png = encode_png(&rendered.pixels, rendered.width, rendered.height)?;

    tracing::debug!(
        name = %item.crop_name,
        width = item.width,
        height = item.height,
        bytes = png.len(),
        "rendered crop"
    );
    Ok(png)
}

fn sample(
    image: &DecodedImage,
    source: PixelRect,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidOutputSize(format!("{width}x{height}")));
    }

    let invalid = || ExportError::InvalidImage {
        width: image.width,
        height: image.height,
        actual: image.pixels.len(),
    };
    if image.is_empty() {
        return Err(invalid());
    }
    let mut rgb = image.to_rgb_image().ok_or_else(invalid)?;

    // Clamp again in case the rect was planned against other dimensions
    let x = source.x.min(image.width - 1);
    let y = source.y.min(image.height - 1);
    let w = source.width.min(image.width - x).max(1);
    let h = source.height.min(image.height - y).max(1);

    let cropped = imageops::crop(&mut rgb, x, y, w, h).to_image();
    if (w, h) == (width, height) {
        return Ok(DecodedImage::from_rgb_image(cropped));
    }

    let resized = imageops::resize(&cropped, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AspectRatio, ImageDimensions};

    /// 4x2 image: left half red, right half blue.
    fn split_image() -> DecodedImage {
        let mut pixels = Vec::new();
        for _ in 0..2 {
            for x in 0..4 {
                if x < 2 {
                    pixels.extend_from_slice(&[255, 0, 0]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        DecodedImage::new(4, 2, pixels)
    }

    #[test]
    fn test_render_crop_samples_region() {
        let image = split_image();
        let rect = CropRect::new(2.0, 0.0, 2.0, 2.0, AspectRatio::SQUARE);

        let out = render_crop(&image, &rect, 2, 2, FilterType::Nearest).unwrap();
        assert_eq!((out.width, out.height), (2, 2));
        assert!(out.pixels.chunks(3).all(|px| px == [0, 0, 255]));
    }

    #[test]
    fn test_render_crop_scales_to_output() {
        let image = split_image();
        let rect = CropRect::new(0.0, 0.0, 2.0, 2.0, AspectRatio::SQUARE);

        let out = render_crop(&image, &rect, 8, 8, FilterType::Bilinear).unwrap();
        assert_eq!((out.width, out.height), (8, 8));
        assert_eq!(out.pixels.len(), 8 * 8 * 3);
        assert_eq!(&out.pixels[0..3], &[255, 0, 0]);
    }

    #[test]
    fn test_render_crop_clamps_overhang() {
        let image = split_image();
        let rect = CropRect::new(3.0, 1.0, 10.0, 10.0, AspectRatio::SQUARE);

        let out = render_crop(&image, &rect, 1, 1, FilterType::Nearest).unwrap();
        assert_eq!(out.pixels, vec![0, 0, 255]);
    }

    #[test]
    fn test_render_crop_rejects_zero_output() {
        let image = split_image();
        let rect = CropRect::new(0.0, 0.0, 2.0, 2.0, AspectRatio::SQUARE);
        assert!(matches!(
            render_crop(&image, &rect, 0, 10, FilterType::Nearest),
            Err(ExportError::InvalidOutputSize(_))
        ));
    }

    #[test]
    fn test_render_crop_rejects_bad_buffer() {
        let image = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0; 3],
        };
        let rect = CropRect::new(0.0, 0.0, 2.0, 2.0, AspectRatio::SQUARE);
        assert!(matches!(
            render_crop(&image, &rect, 2, 2, FilterType::Nearest),
            Err(ExportError::InvalidImage { actual: 3, .. })
        ));
    }

    #[test]
    fn test_export_crop_produces_png() {
        let image = split_image();
        let item = ExportItem {
            entry_index: 0,
            crop_name: "1.png".to_string(),
            original_name: None,
            width: 3,
            height: 3,
            source: CropRect::new(0.0, 0.0, 2.0, 2.0, AspectRatio::SQUARE)
                .to_pixel_rect(ImageDimensions::new(4, 2)),
        };

        let png = export_crop(&image, &item, FilterType::Bilinear).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = crate::decode::decode_image(&png).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 3));
    }
}
