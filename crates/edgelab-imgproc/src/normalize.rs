//! Conversion of gradient responses back to storable pixels.
//!
//! Gradient magnitudes are unbounded floating point values. Before an image can be saved it is
//! clipped to `[0, 255]` and truncated to `u8` with [`normalize_clip_u8`]. There is no contrast
//! stretching of the stored values: weak gradients stay dark. [`normalize_min_max_u8`] stretches
//! an already stored image over the full range for display.

use edgelab_image::{Image, ImageError};
use num_traits::Float;

/// Clip a floating point image to `[0, 255]` and truncate it to `u8`.
///
/// The fractional part is dropped, so `12.9` becomes `12`. NaN samples map to 0. An image whose
/// samples are integers in `[0, 255]` converts without change.
///
/// # Example
///
/// ```
/// use edgelab_image::Image;
/// use edgelab_imgproc::normalize::normalize_clip_u8;
///
/// let src = Image::<f32, 1>::from_rows(&[[-3.0, 12.4, 12.6, 300.0]]).unwrap();
/// let dst = normalize_clip_u8(&src);
///
/// assert_eq!(dst.as_slice(), &[0, 12, 12, 255]);
/// ```
pub fn normalize_clip_u8<T, const C: usize>(src: &Image<T, C>) -> Image<u8, C>
where
    T: Float,
{
    let lo = T::zero();
    let hi = num_traits::cast::<u8, T>(u8::MAX).unwrap_or_else(T::max_value);

    src.map(|&v| {
        if v.is_nan() {
            return 0;
        }
        // in range after clamping, the cast cannot fail
        v.max(lo).min(hi).to_u8().unwrap_or(0)
    })
}

/// Stretch the values of an image linearly over `[0, 255]`.
///
/// The minimum maps to 0 and the maximum to 255; a sample `v` maps to
/// `floor(256 * (v - min) / (max - min))` capped at 255. A constant image maps to all zeros.
///
/// # Example
///
/// ```
/// use edgelab_image::Image;
/// use edgelab_imgproc::normalize::normalize_min_max_u8;
///
/// let src = Image::<u8, 1>::from_rows(&[[10, 20, 30]]).unwrap();
/// assert_eq!(normalize_min_max_u8(&src).as_slice(), &[0, 128, 255]);
/// ```
pub fn normalize_min_max_u8<const C: usize>(src: &Image<u8, C>) -> Image<u8, C> {
    let (min, max) = match find_min_max(src) {
        Ok(range) => range,
        Err(_) => return src.clone(),
    };

    if min == max {
        return src.map(|_| 0);
    }

    let range = u32::from(max - min);
    src.map(|&v| (u32::from(v - min) * 256 / range).min(255) as u8)
}

/// Find the minimum and maximum values in an image.
///
/// # Errors
///
/// Returns [`ImageError::EmptyImage`] if the image has no pixels.
///
/// # Example
///
/// ```
/// use edgelab_image::Image;
/// use edgelab_imgproc::normalize::find_min_max;
///
/// let image = Image::<f32, 1>::from_rows(&[[0.5, 3.0], [-1.0, 2.0]]).unwrap();
/// assert_eq!(find_min_max(&image).unwrap(), (-1.0, 3.0));
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImageError>
where
    T: PartialOrd + Copy,
{
    let mut iter = image.as_slice().iter().copied();
    let first = iter.next().ok_or(ImageError::EmptyImage)?;

    let (min, max) = iter.fold((first, first), |(min, max), v| {
        (
            if v < min { v } else { min },
            if v > max { v } else { max },
        )
    });

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgelab_image::ImageSize;

    #[test]
    fn test_normalize_clip_u8() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_rows(&[
            [-10.0, 0.0, 0.49, 0.5],
            [127.4, 254.6, 255.0, 1e9],
        ])?;

        let dst = normalize_clip_u8(&src);

        assert_eq!(dst.size(), src.size());
        assert_eq!(dst.as_slice(), &[0, 0, 0, 0, 127, 254, 255, 255]);

        Ok(())
    }

    #[test]
    fn test_normalize_in_range_is_noop() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 16,
            height: 16,
        };
        let pixels = (0..=255u8).collect::<Vec<_>>();
        let src = Image::<u8, 1>::new(size, pixels.clone())?;

        let dst = normalize_clip_u8(&src.map(|&v| v as f64));

        assert_eq!(dst, src);

        Ok(())
    }

    #[test]
    fn test_normalize_nan_and_infinity() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_rows(&[[f32::NAN, f32::INFINITY, f32::NEG_INFINITY]])?;
        let dst = normalize_clip_u8(&src);
        assert_eq!(dst.as_slice(), &[0, 255, 0]);
        Ok(())
    }

    #[test]
    fn test_normalize_min_max_u8() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_rows(&[[50, 51, 52], [53, 54, 60]])?;
        let dst = normalize_min_max_u8(&src);
        assert_eq!(dst.as_slice(), &[0, 25, 51, 76, 102, 255]);

        let full = Image::<u8, 1>::from_rows(&[[0, 128, 255]])?;
        assert_eq!(normalize_min_max_u8(&full), full);

        let flat = Image::<u8, 1>::from_size_val([3, 2].into(), 77)?;
        assert_eq!(normalize_min_max_u8(&flat).as_slice(), &[0; 6]);

        let empty = Image::<u8, 1>::new(ImageSize::default(), vec![])?;
        assert!(normalize_min_max_u8(&empty).is_empty());

        Ok(())
    }

    #[test]
    fn test_find_min_max() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[[7, 3, 9], [4, 12, 5]])?;
        assert_eq!(find_min_max(&image)?, (3, 12));

        let single = Image::<f32, 1>::from_rows(&[[2.5]])?;
        assert_eq!(find_min_max(&single)?, (2.5, 2.5));

        let empty = Image::<f32, 1>::new(ImageSize::default(), vec![])?;
        assert_eq!(find_min_max(&empty), Err(ImageError::EmptyImage));

        Ok(())
    }
}
