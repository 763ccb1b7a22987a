#![deny(missing_docs)]
//! Image types for generating and manipulating pixel grids

/// image representation for edge detection purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
