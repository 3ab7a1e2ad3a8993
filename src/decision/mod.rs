use nalgebra::*;
use serde::{Serialize, Deserialize};
use std::fmt::{self, Display};
use crate::fit::ConditionalGaussian;
use crate::table::Dataset;
use crate::error::Error;

/// Most likely class per observation: the argmax over classes of the
/// conditional log-likelihood. Ties resolve to the lowest class index.
pub fn classify(
    model : &ConditionalGaussian,
    y : DMatrixSlice<'_, f64>
) -> Result<Vec<usize>, Error> {
    let cond = model.conditional_log_prob(y)?;
    let mut pred = Vec::with_capacity(cond.nrows());
    for row in cond.row_iter() {
        let mut best = 0;
        for j in 1..row.ncols() {
            if row[j] > row[best] {
                best = j;
            }
        }
        pred.push(best);
    }
    Ok(pred)
}

/// Average log-likelihood the model assigns to the true class of each
/// observation: the mean over rows of the conditional matrix entry at
/// the observation's own label.
pub fn avg_conditional_log_prob(
    model : &ConditionalGaussian,
    y : DMatrixSlice<'_, f64>,
    labels : &[usize]
) -> Result<f64, Error> {
    let cond = model.conditional_log_prob(y)?;
    if labels.len() != cond.nrows() {
        return Err(Error::DimensionMismatch {
            expected : cond.nrows(),
            found : labels.len()
        });
    }
    let mut acc = 0.0;
    for (row, lbl) in labels.iter().enumerate() {
        if *lbl >= model.n_classes() {
            return Err(Error::LabelOutOfRange {
                row,
                label : *lbl,
                n_class : model.n_classes()
            });
        }
        acc += cond[(row, *lbl)];
    }
    Ok(acc / labels.len() as f64)
}

/// Fraction of predictions equal to the true labels.
pub fn accuracy(pred : &[usize], truth : &[usize]) -> f64 {
    assert!(pred.len() == truth.len());
    let correct = pred.iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t )
        .count();
    correct as f64 / truth.len() as f64
}

/// The four scalars of the evaluation contract: average true-label
/// conditional log-likelihood and classification accuracy, each over
/// the training and test partitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {

    pub train_avg_log_prob : f64,

    pub test_avg_log_prob : f64,

    pub train_accuracy : f64,

    pub test_accuracy : f64

}

impl Report {

    /// Evaluates an already-fitted model over both partitions of the
    /// dataset.
    pub fn evaluate(model : &ConditionalGaussian, data : &Dataset) -> Result<Self, Error> {
        let train = data.train_x.slice((0, 0), data.train_x.shape());
        let test = data.test_x.slice((0, 0), data.test_x.shape());
        let train_pred = classify(model, train)?;
        let test_pred = classify(model, test)?;
        Ok(Report {
            train_avg_log_prob : avg_conditional_log_prob(model, train, &data.train_y)?,
            test_avg_log_prob : avg_conditional_log_prob(model, test, &data.test_y)?,
            train_accuracy : accuracy(&train_pred, &data.train_y),
            test_accuracy : accuracy(&test_pred, &data.test_y)
        })
    }

}

impl Display for Report {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average conditional log-likelihood over the true training labels: {:.6}", self.train_avg_log_prob)?;
        writeln!(f, "Average conditional log-likelihood over the true test labels: {:.6}", self.test_avg_log_prob)?;
        writeln!(f, "Accuracy over the training set: {:.6}", self.train_accuracy)?;
        write!(f, "Accuracy over the test set: {:.6}", self.test_accuracy)
    }

}
