use std::f64::consts::SQRT_2;

use super::FilterError;

const ROBERTS_KERNEL_X: [[f64; 2]; 2] = [[1.0, 0.0], [0.0, -1.0]];
const ROBERTS_KERNEL_Y: [[f64; 2]; 2] = [[0.0, 1.0], [-1.0, 0.0]];

const PREWITT_KERNEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];
const PREWITT_KERNEL_Y: [[f64; 3]; 3] = [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

const SOBEL_KERNEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const FREI_CHEN_KERNEL_X: [[f64; 3]; 3] =
    [[-1.0, 0.0, 1.0], [-SQRT_2, 0.0, SQRT_2], [-1.0, 0.0, 1.0]];
const FREI_CHEN_KERNEL_Y: [[f64; 3]; 3] =
    [[-1.0, -SQRT_2, -1.0], [0.0, 0.0, 0.0], [1.0, SQRT_2, 1.0]];

/// A 2D kernel of weights stored row-major.
///
/// The kernel is applied as-is (correlation), its anchor is the cell `(rows / 2, cols / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Create a new kernel from its shape and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyKernel`] if either dimension is zero and
    /// [`FilterError::InvalidKernelShape`] if `weights` does not hold `rows * cols` values.
    ///
    /// # Example
    ///
    /// ```
    /// use edgelab_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::new(1, 3, vec![-1.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(kernel.rows(), 1);
    /// assert_eq!(kernel.cols(), 3);
    /// ```
    pub fn new(rows: usize, cols: usize, weights: Vec<f64>) -> Result<Self, FilterError> {
        if rows == 0 || cols == 0 {
            return Err(FilterError::EmptyKernel);
        }

        if weights.len() != rows * cols {
            return Err(FilterError::InvalidKernelShape(weights.len(), rows, cols));
        }

        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    /// Create a new kernel from a slice of rows.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyKernel`] if there are no rows or the rows are empty.
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Result<Self, FilterError> {
        Self::new(rows.len(), N, rows.concat())
    }

    // only called with the non empty operator tables
    fn from_table<const N: usize>(table: &[[f64; N]; N]) -> Self {
        Self {
            rows: N,
            cols: N,
            weights: table.concat(),
        }
    }

    /// Number of rows of the kernel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns of the kernel.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The kernel weights, row-major.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Get the weight at row `r` and column `c`.
    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(self.weights[r * self.cols + c])
    }

    /// Sum of all the weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Whether both dimensions are odd.
    pub fn is_odd(&self) -> bool {
        self.rows % 2 == 1 && self.cols % 2 == 1
    }

    /// Embed the kernel into the next odd size.
    ///
    /// An even dimension gets a trailing zero row or column. The anchor `(rows / 2, cols / 2)`
    /// lands on the same weight, so correlating with the result gives the same output as the
    /// original kernel. Odd kernels are returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use edgelab_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::from_rows(&[[1.0, 0.0], [0.0, -1.0]]).unwrap().to_odd();
    /// assert_eq!((kernel.rows(), kernel.cols()), (3, 3));
    /// assert_eq!(kernel.get(1, 1), Some(-1.0));
    /// ```
    pub fn to_odd(&self) -> Kernel {
        if self.is_odd() {
            return self.clone();
        }

        let rows = self.rows | 1;
        let cols = self.cols | 1;

        let mut weights = vec![0.0; rows * cols];
        for (dst_row, src_row) in weights
            .chunks_exact_mut(cols)
            .zip(self.weights.chunks_exact(self.cols))
        {
            dst_row[..self.cols].copy_from_slice(src_row);
        }

        Kernel {
            rows,
            cols,
            weights,
        }
    }
}

/// An ordered pair of kernels approximating the horizontal and vertical derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelPair {
    horizontal: Kernel,
    vertical: Kernel,
}

impl KernelPair {
    /// Create a new pair from the horizontal and vertical kernels.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::KernelPairMismatch`] if both kernels do not share the same shape.
    pub fn new(horizontal: Kernel, vertical: Kernel) -> Result<Self, FilterError> {
        if horizontal.rows() != vertical.rows() || horizontal.cols() != vertical.cols() {
            return Err(FilterError::KernelPairMismatch(
                horizontal.rows(),
                horizontal.cols(),
                vertical.rows(),
                vertical.cols(),
            ));
        }

        Ok(Self {
            horizontal,
            vertical,
        })
    }

    fn from_tables<const N: usize>(horizontal: &[[f64; N]; N], vertical: &[[f64; N]; N]) -> Self {
        Self {
            horizontal: Kernel::from_table(horizontal),
            vertical: Kernel::from_table(vertical),
        }
    }

    /// The kernel approximating the derivative along x.
    pub fn horizontal(&self) -> &Kernel {
        &self.horizontal
    }

    /// The kernel approximating the derivative along y.
    pub fn vertical(&self) -> &Kernel {
        &self.vertical
    }
}

/// Create the 2x2 Roberts cross kernels.
pub fn roberts_kernels() -> KernelPair {
    KernelPair::from_tables(&ROBERTS_KERNEL_X, &ROBERTS_KERNEL_Y)
}

/// Create the 3x3 Prewitt kernels.
pub fn prewitt_kernels() -> KernelPair {
    KernelPair::from_tables(&PREWITT_KERNEL_X, &PREWITT_KERNEL_Y)
}

/// Create the 3x3 Sobel kernels.
pub fn sobel_kernels() -> KernelPair {
    KernelPair::from_tables(&SOBEL_KERNEL_X, &SOBEL_KERNEL_Y)
}

/// Create the 3x3 Frei-Chen kernels, the Sobel layout weighted by the square root of two.
pub fn frei_chen_kernels() -> KernelPair {
    KernelPair::from_tables(&FREI_CHEN_KERNEL_X, &FREI_CHEN_KERNEL_Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kernel_new() -> Result<(), FilterError> {
        let kernel = Kernel::new(3, 1, vec![1.0, 2.0, 1.0])?;
        assert_eq!(kernel.rows(), 3);
        assert_eq!(kernel.cols(), 1);
        assert_eq!(kernel.get(1, 0), Some(2.0));
        assert_eq!(kernel.get(0, 1), None);
        assert_eq!(kernel.sum(), 4.0);

        assert_eq!(Kernel::new(0, 3, vec![]), Err(FilterError::EmptyKernel));
        assert_eq!(
            Kernel::new(2, 2, vec![1.0; 3]),
            Err(FilterError::InvalidKernelShape(3, 2, 2))
        );

        let no_rows: &[[f64; 3]] = &[];
        assert_eq!(Kernel::from_rows(no_rows), Err(FilterError::EmptyKernel));

        Ok(())
    }

    #[test]
    fn test_kernel_to_odd() -> Result<(), FilterError> {
        let kernel = Kernel::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
        assert!(!kernel.is_odd());

        let odd = kernel.to_odd();
        assert!(odd.is_odd());
        #[rustfmt::skip]
        assert_eq!(
            odd.weights(),
            &[
                1.0, 2.0, 0.0,
                3.0, 4.0, 0.0,
                0.0, 0.0, 0.0,
            ]
        );

        let row = Kernel::new(1, 4, vec![1.0, 2.0, 3.0, 4.0])?.to_odd();
        assert_eq!((row.rows(), row.cols()), (1, 5));
        assert_eq!(row.weights(), &[1.0, 2.0, 3.0, 4.0, 0.0]);

        let sobel = sobel_kernels();
        assert_eq!(&sobel.horizontal().to_odd(), sobel.horizontal());

        Ok(())
    }

    #[test]
    fn test_kernel_pair_mismatch() -> Result<(), FilterError> {
        let h = Kernel::new(3, 3, vec![0.0; 9])?;
        let v = Kernel::new(2, 2, vec![0.0; 4])?;
        assert_eq!(
            KernelPair::new(h.clone(), v),
            Err(FilterError::KernelPairMismatch(3, 3, 2, 2))
        );

        let pair = KernelPair::new(h.clone(), h)?;
        assert_eq!(pair.horizontal(), pair.vertical());

        Ok(())
    }

    #[test]
    fn test_operator_kernels() {
        let roberts = roberts_kernels();
        assert_eq!(roberts.horizontal().weights(), &[1.0, 0.0, 0.0, -1.0]);
        assert_eq!(roberts.vertical().weights(), &[0.0, 1.0, -1.0, 0.0]);

        let sobel = sobel_kernels();
        assert_eq!(sobel.horizontal().get(1, 2), Some(2.0));
        assert_eq!(sobel.vertical().get(2, 1), Some(2.0));

        let prewitt = prewitt_kernels();
        assert_eq!(prewitt.horizontal().get(1, 0), Some(-1.0));

        let frei_chen = frei_chen_kernels();
        assert_eq!(frei_chen.horizontal().get(1, 2), Some(SQRT_2));
        assert_eq!(frei_chen.vertical().get(0, 1), Some(-SQRT_2));

        // derivative kernels have zero response on flat regions
        for pair in [roberts, prewitt, sobel, frei_chen] {
            assert_abs_diff_eq!(pair.horizontal().sum(), 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(pair.vertical().sum(), 0.0, epsilon = 1e-6);
        }
    }
}
