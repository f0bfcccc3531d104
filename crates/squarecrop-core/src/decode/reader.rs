//! Image decoding with EXIF orientation handling.
//!
//! Any format the `image` crate is built with (JPEG and PNG here) is
//! accepted. Orientation is applied so that crops are computed on the image
//! as the user sees it.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};
use crate::geometry::ImageDimensions;

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes (JPEG or PNG)
///
/// # Returns
///
/// An upright `DecodedImage` with RGB pixel data.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` if the image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);

    let img = guessed_reader(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    if rgb_img.width() == 0 || rgb_img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    tracing::debug!(
        width = rgb_img.width(),
        height = rgb_img.height(),
        ?orientation,
        "decoded image"
    );
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Read the oriented dimensions of an image without decoding its pixels.
///
/// Used to build crop entries for a batch before any pixels are needed.
///
/// # Errors
///
/// Same as [`decode_image`].
pub fn probe_dimensions(bytes: &[u8]) -> Result<ImageDimensions, DecodeError> {
    let (width, height) = guessed_reader(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }
    Ok(get_orientation(bytes).orient(width, height))
}

/// EXIF orientation of the image in `bytes`.
///
/// Returns `Orientation::Normal` if no EXIF data is found or the orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
