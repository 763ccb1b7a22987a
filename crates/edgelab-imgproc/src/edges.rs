//! Gradient based edge operators.
//!
//! Every operator correlates the image with a pair of derivative kernels and combines the two
//! responses into the gradient magnitude `sqrt(gx^2 + gy^2)`. The operators only differ in
//! their kernels, see [`EdgeOperator`].
//!
//! # Example
//!
//! ```
//! use edgelab_image::Image;
//! use edgelab_imgproc::edges::{sobel, EdgeOperator};
//!
//! let image = Image::<u8, 1>::from_rows(&[[0, 0, 100, 100], [0, 0, 100, 100]]).unwrap();
//!
//! let magnitude = sobel(&image).unwrap();
//! assert_eq!(magnitude.as_slice(), &[0.0, 400.0, 400.0, 0.0, 0.0, 400.0, 400.0, 0.0]);
//!
//! for operator in EdgeOperator::ALL {
//!     let magnitude = operator.apply(&image).unwrap();
//!     assert_eq!(magnitude.size(), image.size());
//! }
//! ```

use edgelab_image::Image;
use num_traits::AsPrimitive;

use crate::filter::{self, convolve, FilterError, KernelPair};

/// The classical gradient edge operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeOperator {
    /// 2x2 Roberts cross.
    Roberts,
    /// 3x3 Prewitt, uniform smoothing across the derivative.
    Prewitt,
    /// 3x3 Sobel, center weighted smoothing across the derivative.
    Sobel,
    /// 3x3 Frei-Chen, isotropic variant of Sobel.
    FreiChen,
}

impl EdgeOperator {
    /// All the operators in display order.
    pub const ALL: [EdgeOperator; 4] = [
        EdgeOperator::Roberts,
        EdgeOperator::Prewitt,
        EdgeOperator::Sobel,
        EdgeOperator::FreiChen,
    ];

    /// Human readable name of the operator.
    pub fn name(&self) -> &'static str {
        match self {
            EdgeOperator::Roberts => "Roberts",
            EdgeOperator::Prewitt => "Prewitt",
            EdgeOperator::Sobel => "Sobel",
            EdgeOperator::FreiChen => "Frei-Chen",
        }
    }

    /// Lowercase name used in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            EdgeOperator::Roberts => "roberts",
            EdgeOperator::Prewitt => "prewitt",
            EdgeOperator::Sobel => "sobel",
            EdgeOperator::FreiChen => "frei-chen",
        }
    }

    /// The horizontal and vertical kernels of the operator.
    pub fn kernels(&self) -> KernelPair {
        match self {
            EdgeOperator::Roberts => filter::kernels::roberts_kernels(),
            EdgeOperator::Prewitt => filter::kernels::prewitt_kernels(),
            EdgeOperator::Sobel => filter::kernels::sobel_kernels(),
            EdgeOperator::FreiChen => filter::kernels::frei_chen_kernels(),
        }
    }

    /// Compute the gradient magnitude of `src` with this operator.
    pub fn apply<T>(&self, src: &Image<T, 1>) -> Result<Image<f64, 1>, FilterError>
    where
        T: AsPrimitive<f64>,
    {
        gradient_magnitude(src, &self.kernels())
    }
}

impl std::fmt::Display for EdgeOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute the gradient magnitude of an image from a pair of derivative kernels.
///
/// Both kernels are correlated with `src` using reflective borders and combined per pixel as
/// `sqrt(gx^2 + gy^2)`. Kernels with an even dimension are anchored at
/// `(rows / 2, cols / 2)`, see [`filter::Kernel::to_odd`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `kernels` - The horizontal and vertical kernels.
///
/// # Returns
///
/// A non negative floating point image with shape (H, W). Values are not clamped.
pub fn gradient_magnitude<T>(
    src: &Image<T, 1>,
    kernels: &KernelPair,
) -> Result<Image<f64, 1>, FilterError>
where
    T: AsPrimitive<f64>,
{
    let gx = convolve(src, &kernels.horizontal().to_odd())?;
    let gy = convolve(src, &kernels.vertical().to_odd())?;

    let mut dst = Image::<f64, 1>::from_size_val(src.size(), 0.0)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(gx.as_slice().iter())
        .zip(gy.as_slice().iter())
        .for_each(|((dst, &gx), &gy)| {
            *dst = (gx * gx + gy * gy).sqrt();
        });

    Ok(dst)
}

/// Compute the Roberts cross gradient magnitude.
pub fn roberts<T: AsPrimitive<f64>>(src: &Image<T, 1>) -> Result<Image<f64, 1>, FilterError> {
    EdgeOperator::Roberts.apply(src)
}

/// Compute the Prewitt gradient magnitude.
pub fn prewitt<T: AsPrimitive<f64>>(src: &Image<T, 1>) -> Result<Image<f64, 1>, FilterError> {
    EdgeOperator::Prewitt.apply(src)
}

/// Compute the Sobel gradient magnitude.
pub fn sobel<T: AsPrimitive<f64>>(src: &Image<T, 1>) -> Result<Image<f64, 1>, FilterError> {
    EdgeOperator::Sobel.apply(src)
}

/// Compute the Frei-Chen gradient magnitude.
pub fn frei_chen<T: AsPrimitive<f64>>(src: &Image<T, 1>) -> Result<Image<f64, 1>, FilterError> {
    EdgeOperator::FreiChen.apply(src)
}
