//! Image encoding for export.
//!
//! Every crop is written as PNG; originals in square mode are passed through
//! untouched by the caller and never re-encoded.
//!
//! # Example
//!
//! ```ignore
//! use squarecrop_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 3];
//! let png = encode_png(&pixels, 100, 100).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

mod png;

pub use png::{encode_png, EncodeError};
