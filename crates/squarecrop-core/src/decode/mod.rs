//! Image decoding for the crop editor.
//!
//! Decoding happens once per image when a batch is loaded: the oriented
//! dimensions seed the crop geometry, and the pixels are kept for export.
//!
//! # Example
//!
//! ```ignore
//! use squarecrop_core::decode::{decode_image, probe_dimensions};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let dims = probe_dimensions(&bytes).unwrap();
//! let image = decode_image(&bytes).unwrap();
//! assert_eq!(image.dimensions(), dims);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, get_orientation, probe_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
