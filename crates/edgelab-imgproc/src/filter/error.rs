use edgelab_image::ImageError;

/// Errors related to kernels and filter operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The provided kernel has no weights.
    #[error("Kernel must have at least one row and one column")]
    EmptyKernel,

    /// The number of weights does not match the kernel shape.
    #[error("Kernel has {0} weights but its shape is {1}x{2}")]
    InvalidKernelShape(usize, usize, usize),

    /// The kernel must have odd dimensions to be centered on a pixel.
    #[error("Kernel size {0}x{1} must be odd in both dimensions")]
    EvenKernelSize(usize, usize),

    /// The two kernels of a pair have different shapes.
    #[error("Kernel pair shapes differ: {0}x{1} and {2}x{3}")]
    KernelPairMismatch(usize, usize, usize, usize),

    /// Error from the underlying image operation.
    #[error(transparent)]
    Image(#[from] ImageError),
}
