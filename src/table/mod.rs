use nalgebra::*;
use std::path::Path;
use crate::error::Error;

pub mod csv;

pub use self::csv::*;

/// The four arrays of the data contract: training and test feature
/// matrices with index-aligned label vectors. Labels are parsed and
/// range-checked once, here, so the numerical core never coerces them
/// again.
#[derive(Debug, Clone)]
pub struct Dataset {

    pub train_x : DMatrix<f64>,

    pub train_y : Vec<usize>,

    pub test_x : DMatrix<f64>,

    pub test_y : Vec<usize>

}

impl Dataset {

    /// Builds a dataset from already-loaded arrays, verifying that the
    /// labels align with the feature rows and that both partitions share
    /// the feature dimension.
    pub fn new(
        train_x : DMatrix<f64>,
        train_y : Vec<usize>,
        test_x : DMatrix<f64>,
        test_y : Vec<usize>
    ) -> Result<Self, Error> {
        if train_y.len() != train_x.nrows() {
            return Err(Error::DimensionMismatch {
                expected : train_x.nrows(),
                found : train_y.len()
            });
        }
        if test_y.len() != test_x.nrows() {
            return Err(Error::DimensionMismatch {
                expected : test_x.nrows(),
                found : test_y.len()
            });
        }
        if test_x.ncols() != train_x.ncols() {
            return Err(Error::DimensionMismatch {
                expected : train_x.ncols(),
                found : test_x.ncols()
            });
        }
        Ok(Self { train_x, train_y, test_x, test_y })
    }

    /// Loads train_features.csv, train_labels.csv, test_features.csv and
    /// test_labels.csv from the informed directory. Feature files are
    /// headerless CSV with one observation per row; label files hold one
    /// integer per row, which must be smaller than n_class.
    pub fn load_all_data(dir : &Path, n_class : usize) -> Result<Self, Error> {
        let train_x = load_matrix_from_file(&dir.join("train_features.csv"))?;
        let train_y = load_labels_from_file(&dir.join("train_labels.csv"), n_class)?;
        let test_x = load_matrix_from_file(&dir.join("test_features.csv"))?;
        let test_y = load_labels_from_file(&dir.join("test_labels.csv"), n_class)?;
        Self::new(train_x, train_y, test_x, test_y)
    }

}
