#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use edgelab_image as image;

#[doc(inline)]
pub use edgelab_imgproc as imgproc;

#[doc(inline)]
pub use edgelab_io as io;

/// Comparison figures of several edge maps.
pub mod figure;

/// Batch processing of a set of images.
pub mod pipeline;

/// Streaming of comparison figures to the rerun viewer.
#[cfg(feature = "rerun")]
pub mod viz;
