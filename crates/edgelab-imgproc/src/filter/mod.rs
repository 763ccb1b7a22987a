//! Filter operations
//!
//! This module provides the kernel types and the sliding-window correlation
//! used by the gradient edge operators.

/// Filter kernels
pub mod kernels;
pub use kernels::{Kernel, KernelPair};

/// Filter errors
mod error;
pub use error::FilterError;

/// Convolution operations
mod convolution;
pub use convolution::*;
