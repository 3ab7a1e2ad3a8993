/// Error taxonomy raised at the input boundaries of the crate.
pub mod error;

pub use error::Error;

/// Multivariate normal and categorical distributions; the per-class
/// Gaussian conditionals and the class prior of the classifier are
/// instances of these.
pub mod distr;

/// Maximum-likelihood estimation of the per-class mean and stabilized
/// scatter, and evaluation of the generative/conditional log-likelihood
/// matrices.
pub mod fit;

/// Classification by posterior argmax, and the evaluation metrics
/// (average true-label conditional log-likelihood; accuracy).
pub mod decision;

/// CSV-backed loading of the labeled feature tables and matrix output.
pub mod table;

/// Tiling of the per-class covariance log-diagonals into a single
/// matrix for visualization by an external plotter.
pub mod image;
