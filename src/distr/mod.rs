use nalgebra::*;
use std::fmt::Debug;

pub mod multinormal;

pub use multinormal::*;

pub mod categorical;

pub use categorical::*;

/// Trait shared by the parametric distributions used by the classifier.
/// The distribution state is fully defined at construction; summaries
/// (mean, covariance) can be retrieved from it, and the log-probability
/// of a single observation evaluated against it. Observations follow the
/// sample convention used throughout the crate: multivariate quantities
/// are rows of a matrix, so a single observation is a vector with one
/// entry per dimension.
pub trait Distribution
    where Self : Debug + Sized
{

    /// Returns the expected value of the distribution.
    fn mean<'a>(&'a self) -> &'a DVector<f64>;

    /// Returns the positive-definite covariance matrix for multivariate
    /// implementors; None when a covariance summary is not meaningful.
    fn cov(&self) -> Option<DMatrix<f64>>;

    /// Evaluates the log-probability of a single observation with
    /// respect to the distribution parameters.
    fn log_prob(&self, y : DVectorSlice<'_, f64>) -> f64;

    /// Draws n independent observations, arranged over rows.
    fn sample(&self, n : usize) -> DMatrix<f64>;

}
