use nalgebra::*;
use crate::error::Error;

/// Tiles the log-diagonal of each class covariance as a side×side block
/// (row-major, matching the layout of the original side² feature raster)
/// and concatenates the blocks side by side, yielding a side × (k·side)
/// matrix that an external plotter can render as a grayscale image.
pub fn cov_diag_image(covs : &[DMatrix<f64>], side : usize) -> Result<DMatrix<f64>, Error> {
    if covs.is_empty() {
        return Err(Error::EmptyTable);
    }
    let mut img = DMatrix::zeros(side, side * covs.len());
    for (j, cov) in covs.iter().enumerate() {
        if cov.nrows() != side * side {
            return Err(Error::DimensionMismatch {
                expected : side * side,
                found : cov.nrows()
            });
        }
        for (d, v) in cov.diagonal().iter().enumerate() {
            let (r, c) = (d / side, d % side);
            img[(r, j * side + c)] = v.ln();
        }
    }
    Ok(img)
}
