use ::csv;
use nalgebra::{DMatrix, RowDVector};
use std::fs::File;
use std::fmt::Display;
use std::io::{Read, Write};
use std::path::Path;
use crate::error::Error;

/// Parses headerless CSV content as a dynamically allocated matrix.
/// Every field must parse as f64 and all rows must have the same number
/// of fields. The matrix keeps the same order the data is organized over
/// the file.
pub fn load_matrix_from_string(content : &str) -> Result<DMatrix<f64>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut rows : Vec<RowDVector<f64>> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let mut entries = Vec::with_capacity(record.len());
        for field in record.iter() {
            let v = field.parse::<f64>().map_err(|_| Error::Parse {
                line : i + 1,
                field : field.to_string()
            })?;
            entries.push(v);
        }
        if let Some(first) = rows.first() {
            if entries.len() != first.ncols() {
                return Err(Error::DimensionMismatch {
                    expected : first.ncols(),
                    found : entries.len()
                });
            }
        }
        rows.push(RowDVector::from_vec(entries));
    }
    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }
    Ok(DMatrix::from_rows(&rows[..]))
}

pub fn load_matrix_from_file(path : &Path) -> Result<DMatrix<f64>, Error> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    load_matrix_from_string(&content)
}

/// Loads a label vector: a single-column table with one value per row.
/// The stored representation may be floating-point (e.g. "7.0"); each
/// value must be a non-negative integer smaller than n_class, and is
/// fixed to usize here rather than coerced downstream.
pub fn load_labels_from_file(path : &Path, n_class : usize) -> Result<Vec<usize>, Error> {
    let m = load_matrix_from_file(path)?;
    if m.ncols() != 1 {
        return Err(Error::DimensionMismatch { expected : 1, found : m.ncols() });
    }
    let mut labels = Vec::with_capacity(m.nrows());
    for (row, v) in m.column(0).iter().enumerate() {
        if v.fract() != 0.0 || *v < 0.0 {
            return Err(Error::Parse { line : row + 1, field : v.to_string() });
        }
        let lbl = *v as usize;
        if lbl >= n_class {
            return Err(Error::LabelOutOfRange { row, label : lbl, n_class });
        }
        labels.push(lbl);
    }
    Ok(labels)
}

/// Renders a matrix as comma-separated rows, one line per matrix row.
pub fn build_string_packed<N>(m : &DMatrix<N>) -> String
    where N : Scalar + Display
{
    let mut content = String::new();
    for r in m.row_iter() {
        let mut row_iter = r.iter();
        row_iter.next().map(|el| { content += &format!("{}", el); } );
        row_iter.for_each(|el| { content += &format!(",{}", el); } );
        content += "\n";
    }
    content
}

pub fn save_matrix_to_file<N>(m : &DMatrix<N>, path : &Path) -> Result<(), Error>
    where N : Scalar + Display
{
    let content = build_string_packed(m);
    File::create(path)?.write_all(content.as_bytes())?;
    Ok(())
}

use nalgebra::Scalar;
