use edgelab_image::{Image, ImageError, ImageSize};

/// A border type for the spatial padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// This border type reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...c b a | a b c d...
    #[default]
    Reflect,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b | a b c d...
    Reflect101,
}

impl PaddingMode {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i - 1;
            } else if i >= len {
                i = 2 * len - i - 1;
            }
        }
        i as usize
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else if i >= len {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the padding mode.
    ///
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    ///
    /// # Arguments
    /// - `i`: The (possibly out-of-range) coordinate index.
    /// - `len`: The valid length of the dimension, must be non zero.
    ///
    /// # Returns
    /// A valid mapped index within `[0, len)`.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Reflect => Self::reflect(i, len),
            PaddingMode::Reflect101 => Self::reflect101(i, len),
        }
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Symmetric padding of `rows` on top and bottom and `cols` on left and right.
    pub fn symmetric(rows: usize, cols: usize) -> Self {
        Self {
            top: rows,
            bottom: rows,
            left: cols,
            right: cols,
        }
    }

    /// Size of an image of `size` after applying this padding.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use edgelab_image::ImageSize;
    /// use edgelab_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

/// Fills `dst` with `src` surrounded by the given padding.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides defined in [`Padding2D`].
/// * `padding_mode` - The border handling defined in [`PaddingMode`].
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the size of `dst` does not match the size of
/// `src` grown by `padding`, and [`ImageError::EmptyImage`] if there is border to fill but
/// `src` has no pixels to reflect.
///
/// # Example
///
/// ```rust
/// use edgelab_image::{Image, ImageSize};
/// use edgelab_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let src = Image::<u8, 1>::from_rows(&[[1, 2], [3, 4]]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 0).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::symmetric(1, 1), PaddingMode::Reflect).unwrap();
///
/// assert_eq!(&dst.as_slice()[0..4], &[1, 1, 2, 2]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
) -> Result<(), ImageError>
where
    T: Copy,
{
    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    if dst.is_empty() {
        return Ok(());
    }

    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    let old_width = src.width();
    let old_height = src.height();
    let new_width = dst.width();

    let src_data = src.as_slice();
    let old_stride = old_width * C;

    // source column for every destination column, computed once
    let col_map = (0..new_width)
        .map(|x| padding_mode.map_index(x as isize - padding.left as isize, old_width))
        .collect::<Vec<_>>();

    for (y, dst_row) in dst
        .as_slice_mut()
        .chunks_exact_mut(new_width * C)
        .enumerate()
    {
        let src_y = padding_mode.map_index(y as isize - padding.top as isize, old_height);
        let src_row = &src_data[src_y * old_stride..(src_y + 1) * old_stride];

        for (dst_px, &src_x) in dst_row.chunks_exact_mut(C).zip(col_map.iter()) {
            dst_px.copy_from_slice(&src_row[src_x * C..(src_x + 1) * C]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgelab_image::{Image, ImageError, ImageSize};

    fn make_src_3x3() -> Result<Image<u8, 1>, ImageError> {
        Image::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]])
    }

    fn make_dst(width: usize, height: usize) -> Result<Image<u8, 1>, ImageError> {
        Image::from_size_val(ImageSize { width, height }, 0)
    }

    #[test]
    fn test_map_index_reflect() {
        let mode = PaddingMode::Reflect;
        assert_eq!(mode.map_index(-1, 4), 0);
        assert_eq!(mode.map_index(-2, 4), 1);
        assert_eq!(mode.map_index(4, 4), 3);
        assert_eq!(mode.map_index(5, 4), 2);
        assert_eq!(mode.map_index(2, 4), 2);
        assert_eq!(mode.map_index(-3, 1), 0);
    }

    #[test]
    fn test_map_index_reflect101() {
        let mode = PaddingMode::Reflect101;
        assert_eq!(mode.map_index(-1, 4), 1);
        assert_eq!(mode.map_index(-2, 4), 2);
        assert_eq!(mode.map_index(4, 4), 2);
        assert_eq!(mode.map_index(7, 1), 0);
    }

    #[test]
    fn test_map_index_far_out_of_range() {
        // keeps bouncing between both borders until it lands inside
        assert_eq!(PaddingMode::Reflect.map_index(-5, 2), 0);
        assert_eq!(PaddingMode::Reflect.map_index(6, 2), 1);
        assert_eq!(PaddingMode::Reflect101.map_index(-5, 3), 1);
    }

    #[test]
    fn test_spatial_padding_reflect() -> Result<(), ImageError> {
        let src = make_src_3x3()?;
        let mut dst = make_dst(5, 5)?;

        spatial_padding(
            &src,
            &mut dst,
            Padding2D::symmetric(1, 1),
            PaddingMode::Reflect,
        )?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                1, 1, 2, 3, 3,
                1, 1, 2, 3, 3,
                4, 4, 5, 6, 6,
                7, 7, 8, 9, 9,
                7, 7, 8, 9, 9,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_spatial_padding_reflect_row_above_is_first_row() -> Result<(), ImageError> {
        let src = make_src_3x3()?;
        let mut dst = make_dst(3, 5)?;

        spatial_padding(
            &src,
            &mut dst,
            Padding2D::symmetric(1, 0),
            PaddingMode::Reflect,
        )?;

        // mirrored from row 0, not wrapped from the last row
        assert_eq!(&dst.as_slice()[0..3], &[1, 2, 3]);
        assert_eq!(&dst.as_slice()[12..15], &[7, 8, 9]);

        Ok(())
    }

    #[test]
    fn test_spatial_padding_reflect101() -> Result<(), ImageError> {
        let src = make_src_3x3()?;
        let mut dst = make_dst(5, 5)?;

        spatial_padding(
            &src,
            &mut dst,
            Padding2D::symmetric(1, 1),
            PaddingMode::Reflect101,
        )?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                5, 4, 5, 6, 5,
                2, 1, 2, 3, 2,
                5, 4, 5, 6, 5,
                8, 7, 8, 9, 8,
                5, 4, 5, 6, 5,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_spatial_padding_asymmetric() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_rows(&[[1, 2], [3, 4]])?;
        let mut dst = make_dst(3, 3)?;

        let padding = Padding2D {
            top: 1,
            bottom: 0,
            left: 0,
            right: 1,
        };
        spatial_padding(&src, &mut dst, padding, PaddingMode::Reflect)?;

        assert_eq!(dst.as_slice(), &[1, 2, 2, 1, 2, 2, 3, 4, 4]);

        Ok(())
    }

    #[test]
    fn test_spatial_padding_dst_size_mismatch() -> Result<(), ImageError> {
        let src = make_src_3x3()?;
        let mut dst = make_dst(4, 5)?;

        let res = spatial_padding(
            &src,
            &mut dst,
            Padding2D::symmetric(1, 1),
            PaddingMode::Reflect,
        );
        assert_eq!(res, Err(ImageError::InvalidImageSize(4, 5, 5, 5)));

        Ok(())
    }

    #[test]
    fn test_spatial_padding_larger_than_image() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_rows(&[[7]])?;
        let mut dst = make_dst(9, 7)?;

        spatial_padding(
            &src,
            &mut dst,
            Padding2D::symmetric(3, 4),
            PaddingMode::Reflect,
        )?;

        assert!(dst.as_slice().iter().all(|&v| v == 7));

        Ok(())
    }

    #[test]
    fn test_spatial_padding_empty_source() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(ImageSize::default(), vec![])?;
        let mut dst = make_dst(2, 2)?;

        let res = spatial_padding(
            &src,
            &mut dst,
            Padding2D::symmetric(1, 1),
            PaddingMode::Reflect,
        );
        assert_eq!(res, Err(ImageError::EmptyImage));

        Ok(())
    }
}
