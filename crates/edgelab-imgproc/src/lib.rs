#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// gradient edge operators module.
pub mod edges;

/// image filtering module.
pub mod filter;

/// operations to normalize images.
pub mod normalize;

/// spatial padding module.
pub mod padding;
