use nalgebra::*;
use super::*;
use serde::{Serialize, Deserialize};
use std::fmt::{self, Display};
use crate::error::Error;

/// Discrete distribution over k class indices, parametrized by the
/// probability vector θ. Observations are one-hot rows following the
/// sample convention of the crate. Serves as the class prior of the
/// conditional Gaussian classifier, uniform unless informed otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Categorical {

    theta : DVector<f64>,

    log_theta : DVector<f64>

}

impl Categorical {

    /// Builds from explicit class probabilities, which must be positive
    /// and sum to one.
    pub fn new(theta : &[f64]) -> Result<Self, Error> {
        let sum : f64 = theta.iter().sum();
        if theta.is_empty() || theta.iter().any(|t| *t <= 0.0 ) || (sum - 1.).abs() > 1E-8 {
            return Err(Error::InvalidPrior);
        }
        let theta = DVector::from_column_slice(theta);
        Ok(Self { log_theta : theta.map(|t| t.ln() ), theta })
    }

    /// Uniform prior over k classes.
    pub fn uniform(k : usize) -> Self {
        let theta = DVector::from_element(k, 1. / (k as f64));
        Self { log_theta : theta.map(|t| t.ln() ), theta }
    }

    pub fn n_classes(&self) -> usize {
        self.theta.nrows()
    }

    /// Log-probability of the single class j.
    pub fn log_prob_class(&self, j : usize) -> f64 {
        self.log_theta[j]
    }

}

impl Distribution for Categorical {

    fn mean<'a>(&'a self) -> &'a DVector<f64> {
        &self.theta
    }

    fn cov(&self) -> Option<DMatrix<f64>> {
        None
    }

    /// The observation is a one-hot (or count) vector over the k classes.
    fn log_prob(&self, y : DVectorSlice<'_, f64>) -> f64 {
        self.log_theta.dot(&y)
    }

    fn sample(&self, n : usize) -> DMatrix<f64> {
        use rand::prelude::*;
        let mut rng = rand::thread_rng();
        let mut out = DMatrix::zeros(n, self.n_classes());
        for i in 0..n {
            let u : f64 = rng.gen();
            let mut acc = 0.0;
            let mut chosen = self.n_classes() - 1;
            for (j, t) in self.theta.iter().enumerate() {
                acc += t;
                if u < acc {
                    chosen = j;
                    break;
                }
            }
            out[(i, chosen)] = 1.0;
        }
        out
    }

}

impl Display for Categorical {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cat({})", self.theta.nrows())
    }

}
