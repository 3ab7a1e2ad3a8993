use nalgebra::*;
use nalgebra::storage::*;
use serde::{Serialize, Deserialize};
use crate::distr::*;
use crate::error::Error;

/// Constant added to every diagonal entry of the class scatter matrices,
/// so that a class with few (or degenerate) samples still yields an
/// invertible covariance.
pub const DIAG_RIDGE : f64 = 0.01;

/// Class-conditional Gaussian model: one MultiNormal per class, fitted
/// by maximum likelihood from a labeled sample, plus a categorical
/// class prior. The parameter tables are computed once per training set
/// and held read-only afterwards.
///
/// The covariance of each class is the unnormalized scatter matrix
/// (X_k-μ_k)ᵀ(X_k-μ_k) with DIAG_RIDGE added to the diagonal; it is not
/// divided by the class sample count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalGaussian {

    cond : Vec<MultiNormal>,

    prior : Categorical

}

impl ConditionalGaussian {

    /// Fits the per-class mean and stabilized scatter from the labeled
    /// sample (observations over rows; labels index-aligned with the
    /// rows and smaller than n_class), under a uniform class prior.
    pub fn fit(y : &DMatrix<f64>, labels : &[usize], n_class : usize) -> Result<Self, Error> {
        Self::fit_with_prior(y, labels, Categorical::uniform(n_class))
    }

    /// Same as fit, against an arbitrary class prior.
    pub fn fit_with_prior(
        y : &DMatrix<f64>,
        labels : &[usize],
        prior : Categorical
    ) -> Result<Self, Error> {
        let n_class = prior.n_classes();
        if labels.len() != y.nrows() {
            return Err(Error::DimensionMismatch {
                expected : y.nrows(),
                found : labels.len()
            });
        }
        for (row, lbl) in labels.iter().enumerate() {
            if *lbl >= n_class {
                return Err(Error::LabelOutOfRange { row, label : *lbl, n_class });
            }
        }

        // Single scan: accumulate the per-class sums and counts, then divide.
        let p = y.ncols();
        let mut sums = vec![DVector::<f64>::zeros(p); n_class];
        let mut counts = vec![0usize; n_class];
        for (row, lbl) in labels.iter().enumerate() {
            sums[*lbl] += y.row(row).transpose();
            counts[*lbl] += 1;
        }
        for (j, count) in counts.iter().enumerate() {
            if *count == 0 {
                return Err(Error::EmptyClass(j));
            }
        }

        let mut cond = Vec::with_capacity(n_class);
        for j in 0..n_class {
            let mu = sums[j].unscale(counts[j] as f64);
            let rows : Vec<usize> = labels.iter()
                .enumerate()
                .filter(|(_, lbl)| **lbl == j )
                .map(|(row, _)| row )
                .collect();
            let yj = y.select_rows(rows.iter());
            let mut sigma = MultiNormal::scatter_mle(yj.slice((0, 0), yj.shape()), &mu);
            for d in 0..p {
                sigma[(d, d)] += DIAG_RIDGE;
            }
            cond.push(MultiNormal::new(mu, sigma)?);
        }
        Ok(Self { cond, prior })
    }

    pub fn n_classes(&self) -> usize {
        self.cond.len()
    }

    pub fn dim(&self) -> usize {
        self.cond[0].dim()
    }

    /// Per-class Gaussian conditionals, indexed by class.
    pub fn conditionals<'a>(&'a self) -> &'a [MultiNormal] {
        &self.cond
    }

    pub fn prior<'a>(&'a self) -> &'a Categorical {
        &self.prior
    }

    /// k×p mean table; row j is the mean estimate for class j.
    pub fn means(&self) -> DMatrix<f64> {
        let mut means = DMatrix::zeros(self.n_classes(), self.dim());
        for (j, mn) in self.cond.iter().enumerate() {
            means.row_mut(j).copy_from(&mn.mean().transpose());
        }
        means
    }

    /// Stabilized per-class scatter matrices, indexed by class.
    pub fn covariances(&self) -> Vec<DMatrix<f64>> {
        self.cond.iter().map(|mn| mn.sigma().clone() ).collect()
    }

    /// M×k matrix of the generative log-likelihood log p(x|class),
    /// evaluated independently for every (observation, class) pair.
    pub fn generative_log_prob(&self, y : DMatrixSlice<'_, f64>) -> Result<DMatrix<f64>, Error> {
        if y.ncols() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected : self.dim(),
                found : y.ncols()
            });
        }
        let mut gen = DMatrix::zeros(y.nrows(), self.n_classes());
        for (i, row) in y.row_iter().enumerate() {
            let x = row.transpose();
            for (j, mn) in self.cond.iter().enumerate() {
                gen[(i, j)] = mn.log_prob(x.rows(0, x.nrows()));
            }
        }
        Ok(gen)
    }

    /// M×k matrix of the conditional log-likelihood log p(class|x): the
    /// joint log-likelihood (generative plus log prior), normalized per
    /// observation by the log-sum-exp evidence over classes. Rows
    /// exponentiate to a proper posterior.
    pub fn conditional_log_prob(&self, y : DMatrixSlice<'_, f64>) -> Result<DMatrix<f64>, Error> {
        let mut cond = self.generative_log_prob(y)?;
        for mut row in cond.row_iter_mut() {
            for j in 0..self.prior.n_classes() {
                row[j] += self.prior.log_prob_class(j);
            }
            let evidence = log_sum_exp(&row);
            for e in row.iter_mut() {
                *e -= evidence;
            }
        }
        Ok(cond)
    }

}

/// Numerically stable log(Σ exp xᵢ) over the entries of a matrix or
/// slice: shifts by the maximum before exponentiating. Returns -inf for
/// an all-(-inf) input rather than NaN.
pub fn log_sum_exp<R, C, S>(xs : &Matrix<f64, R, C, S>) -> f64
    where
        R : Dim,
        C : Dim,
        S : Storage<f64, R, C>
{
    let max = xs.iter().fold(std::f64::NEG_INFINITY, |m, x| m.max(*x) );
    if !max.is_finite() {
        return max;
    }
    let sum : f64 = xs.iter().map(|x| (x - max).exp() ).sum();
    max + sum.ln()
}
