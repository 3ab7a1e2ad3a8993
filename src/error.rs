use thiserror::Error;

/// Faults surfaced at the input boundaries (dataset construction, model
/// fit, likelihood evaluation). The numerical core assumes the
/// constructors have already excluded them and does not re-check.
#[derive(Debug, Error)]
pub enum Error {

    /// Fitting requires at least one training sample per class; the class
    /// mean is undefined otherwise.
    #[error("class {0} has no training samples")]
    EmptyClass(usize),

    #[error("label {label} at row {row} is outside 0..{n_class}")]
    LabelOutOfRange { row : usize, label : usize, n_class : usize },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected : usize, found : usize },

    /// Should not occur for a scatter matrix stabilized at the diagonal.
    #[error("covariance matrix is singular")]
    SingularCov,

    #[error("class prior entries must be positive and sum to one")]
    InvalidPrior,

    #[error("table has no rows")]
    EmptyTable,

    #[error("could not parse field '{field}' at line {line}")]
    Parse { line : usize, field : String },

    #[error("error reading table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error)

}
