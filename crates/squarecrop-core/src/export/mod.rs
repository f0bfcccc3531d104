//! Export of confirmed crops.
//!
//! Export is split in two: [`plan_export`] decides which files the archive
//! will hold, their names and their pixel sizes without touching any pixels;
//! [`render_crop`] and [`export_crop`] then produce the bytes for one item.
//! Packaging the files into a ZIP is left to the caller.
//!
//! # Naming
//!
//! Confirmed entries are numbered from 1 in batch order.
//!
//! - Square mode: `{n}-1.png` (crop) and `{n}-2.{ext}` (the original file)
//! - Ratio mode: `{n}.png`

mod plan;
mod render;

use thiserror::Error;

use crate::encode::EncodeError;

pub use plan::{archive_name, output_dimensions, plan_export, ExportItem, ExportPlan, OutputSize};
pub use render::{export_crop, render_crop};

/// Errors that can occur while preparing export output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output size is zero or not a number
    #[error("Invalid output size: {0}")]
    InvalidOutputSize(String),

    /// Source pixels don't match the stated dimensions
    #[error("Invalid source image: {width}x{height} with {actual} bytes")]
    InvalidImage {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Encoding the rendered crop failed
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
