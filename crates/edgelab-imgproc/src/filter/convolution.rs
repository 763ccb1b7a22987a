use edgelab_image::Image;
use num_traits::AsPrimitive;

use super::{FilterError, Kernel};
use crate::padding::{spatial_padding, Padding2D, PaddingMode};

/// Correlate a single channel image with a kernel using reflective borders.
///
/// The kernel is applied as-is (it is not flipped), anchored on its center. The input is
/// padded by `kernel.rows() / 2` rows and `kernel.cols() / 2` columns with
/// [`PaddingMode::Reflect`], so the row above the image mirrors the first row.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `kernel` - A kernel with odd dimensions.
///
/// # Returns
///
/// A floating point image with shape (H, W). Values are not clamped.
///
/// # Errors
///
/// Returns [`FilterError::EvenKernelSize`] if the kernel has an even dimension.
///
/// # Example
///
/// ```
/// use edgelab_image::Image;
/// use edgelab_imgproc::filter::{convolve, Kernel};
///
/// let src = Image::<u8, 1>::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
/// let kernel = Kernel::from_rows(&[[0.0, 0.0, 1.0]]).unwrap();
///
/// let dst = convolve(&src, &kernel).unwrap();
/// assert_eq!(dst.as_slice(), &[2.0, 3.0, 3.0, 5.0, 6.0, 6.0]);
/// ```
pub fn convolve<T>(src: &Image<T, 1>, kernel: &Kernel) -> Result<Image<f64, 1>, FilterError>
where
    T: AsPrimitive<f64>,
{
    convolve_with_padding(src, kernel, PaddingMode::Reflect)
}

/// Correlate a single channel image with a kernel using the given border handling.
///
/// Same as [`convolve`] with a selectable [`PaddingMode`]. [`PaddingMode::Reflect101`]
/// mirrors around the edge sample, the convention of NumPy's `reflect` padding.
///
/// # Errors
///
/// Returns [`FilterError::EvenKernelSize`] if the kernel has an even dimension.
pub fn convolve_with_padding<T>(
    src: &Image<T, 1>,
    kernel: &Kernel,
    padding_mode: PaddingMode,
) -> Result<Image<f64, 1>, FilterError>
where
    T: AsPrimitive<f64>,
{
    if !kernel.is_odd() {
        return Err(FilterError::EvenKernelSize(kernel.rows(), kernel.cols()));
    }

    if src.is_empty() {
        return Ok(Image::new(src.size(), Vec::new())?);
    }

    // weighted sums run in f64
    let src_f64: Image<f64, 1> = src.map(|&v| v.as_());

    let padding = Padding2D::symmetric(kernel.rows() / 2, kernel.cols() / 2);
    let mut padded = Image::<f64, 1>::from_size_val(padding.padded_size(src.size()), 0.0)?;
    spatial_padding(&src_f64, &mut padded, padding, padding_mode)?;

    let kernel_cols = kernel.cols();
    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();

    let mut dst = Image::<f64, 1>::from_size_val(src.size(), 0.0)?;

    for (y, dst_row) in dst.as_slice_mut().chunks_exact_mut(src.cols()).enumerate() {
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (ky, kernel_row) in kernel.weights().chunks_exact(kernel_cols).enumerate() {
                let offset = (y + ky) * padded_cols + x;
                let window_row = &padded_data[offset..offset + kernel_cols];
                for (&pixel, &weight) in window_row.iter().zip(kernel_row) {
                    sum += pixel * weight;
                }
            }
            *dst_px = sum;
        }
    }

    Ok(dst)
}
