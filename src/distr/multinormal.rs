use nalgebra::*;
use super::*;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::fmt::{self, Display};
use crate::error::Error;

/// Multivariate normal parametrized by μ (px1) and Σ (pxp). The
/// covariance inverse and the constant part of the log-density
/// (-p/2 log 2π - 1/2 log|Σ|) are computed once at construction and
/// reused by every log_prob evaluation, so evaluating a full sample
/// against a fixed parameter never re-factorizes Σ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiNormal {

    mu : DVector<f64>,

    sigma : DMatrix<f64>,

    sigma_inv : DMatrix<f64>,

    log_part : f64

}

impl MultiNormal {

    /// Builds the distribution from a mean vector and a covariance
    /// matrix, which must be square, of matching dimension, and
    /// invertible with positive determinant.
    pub fn new(mu : DVector<f64>, sigma : DMatrix<f64>) -> Result<Self, Error> {
        if sigma.nrows() != sigma.ncols() || sigma.nrows() != mu.nrows() {
            return Err(Error::DimensionMismatch {
                expected : mu.nrows(),
                found : sigma.nrows()
            });
        }
        let sigma_inv = Self::invert_scale(&sigma)?;
        let log_part = Self::multinormal_log_part(mu.nrows(), &sigma)?;
        Ok(Self { mu, sigma, sigma_inv, log_part })
    }

    pub fn dim(&self) -> usize {
        self.mu.nrows()
    }

    /// Covariance matrix informed at construction.
    pub fn sigma<'a>(&'a self) -> &'a DMatrix<f64> {
        &self.sigma
    }

    /// Precision matrix (inverse of the covariance).
    pub fn sigma_inv<'a>(&'a self) -> &'a DMatrix<f64> {
        &self.sigma_inv
    }

    fn invert_scale(s : &DMatrix<f64>) -> Result<DMatrix<f64>, Error> {
        let s_qr = QR::<f64, Dynamic, Dynamic>::new(s.clone());
        s_qr.try_inverse().ok_or(Error::SingularCov)
    }

    /// Constant part of the log-density. The determinant comes from the
    /// LU factorization of Σ; a non-positive or non-finite determinant
    /// means the informed matrix is not a usable covariance.
    fn multinormal_log_part(p : usize, sigma : &DMatrix<f64>) -> Result<f64, Error> {
        let sigma_lu = LU::new(sigma.clone());
        let sigma_det = sigma_lu.determinant();
        if sigma_det <= 0.0 || !sigma_det.is_finite() {
            return Err(Error::SingularCov);
        }
        Ok(-0.5 * (p as f64) * (2. * PI).ln() - 0.5 * sigma_det.ln())
    }

    /// Mean maximum likelihood estimate: the arithmetic average of the
    /// sample rows.
    pub fn mean_mle(y : DMatrixSlice<'_, f64>) -> DVector<f64> {
        let n = y.nrows() as f64;
        let mut mu = DVector::zeros(y.ncols());
        for row in y.row_iter() {
            mu += row.transpose();
        }
        mu.unscale(n)
    }

    /// Scatter matrix of the sample rows about mu: (Y-μ)ᵀ(Y-μ), summed
    /// over rows and not divided by the sample count.
    pub fn scatter_mle(y : DMatrixSlice<'_, f64>, mu : &DVector<f64>) -> DMatrix<f64> {
        let p = y.ncols();
        let mut scatter = DMatrix::zeros(p, p);
        for row in y.row_iter() {
            let dev = row.transpose() - mu;
            scatter += &dev * dev.transpose();
        }
        scatter
    }

}

impl Distribution for MultiNormal {

    fn mean<'a>(&'a self) -> &'a DVector<f64> {
        &self.mu
    }

    fn cov(&self) -> Option<DMatrix<f64>> {
        Some(self.sigma.clone())
    }

    fn log_prob(&self, y : DVectorSlice<'_, f64>) -> f64 {
        let dev = y.clone_owned() - &self.mu;
        let quad = (dev.transpose() * &self.sigma_inv * &dev)[0];
        self.log_part - 0.5 * quad
    }

    fn sample(&self, n : usize) -> DMatrix<f64> {
        use rand::prelude::*;
        let chol = Cholesky::new(self.sigma.clone())
            .expect("sampling requires a positive-definite covariance");
        let lower = chol.l();
        let mut rng = rand::thread_rng();
        let mut out = DMatrix::zeros(n, self.dim());
        for i in 0..n {
            let z = DVector::from_fn(self.dim(), |_, _| {
                rng.sample::<f64, _>(rand_distr::StandardNormal)
            });
            let x = &self.mu + &lower * z;
            out.row_mut(i).copy_from(&x.transpose());
        }
        out
    }

}

impl Display for MultiNormal {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MNorm({})", self.mu.nrows())
    }

}
