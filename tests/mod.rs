use nalgebra::*;
use condgauss::distr::*;
use condgauss::fit::{self, ConditionalGaussian, DIAG_RIDGE};
use condgauss::decision;
use condgauss::table::{self, Dataset};
use condgauss::image;
use condgauss::Error;

const EPS : f64 = 10E-8;

// Three classes in the plane with known means and scatters.
fn small_sample() -> (DMatrix<f64>, Vec<usize>) {
    let y = DMatrix::from_row_slice(6, 2, &[
        0.0, 0.0,
        0.0, 1.0,
        4.0, 4.0,
        4.0, 6.0,
        8.0, 9.0,
        10.0, 9.0
    ]);
    (y, vec![0, 0, 1, 1, 2, 2])
}

#[test]
fn mean_table_matches_class_averages() {
    let (y, lbl) = small_sample();
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    let means = model.means();
    let expected = [
        [0.0, 0.5],
        [4.0, 5.0],
        [9.0, 9.0]
    ];
    for j in 0..3 {
        for d in 0..2 {
            assert!((means[(j, d)] - expected[j][d]).abs() < EPS);
        }
    }
    // The single-class estimator agrees with the per-class rows of the table
    let mu0 = MultiNormal::mean_mle(y.slice((0, 0), (2, 2)));
    assert!((mu0[0] - 0.0).abs() < EPS && (mu0[1] - 0.5).abs() < EPS);
}

#[test]
fn precision_is_covariance_inverse() {
    let (y, lbl) = small_sample();
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    for mn in model.conditionals() {
        let ident = mn.sigma() * mn.sigma_inv();
        for r in 0..2 {
            for c in 0..2 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!((ident[(r, c)] - expected).abs() < 1E-6);
            }
        }
    }
}

#[test]
fn scatter_is_unnormalized_and_symmetric() {
    let (y, lbl) = small_sample();
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    let expected = [
        [[0.0, 0.0], [0.0, 0.5]],
        [[0.0, 0.0], [0.0, 2.0]],
        [[2.0, 0.0], [0.0, 0.0]]
    ];
    for (j, sigma) in model.covariances().iter().enumerate() {
        for r in 0..2 {
            for c in 0..2 {
                assert!((sigma[(r, c)] - sigma[(c, r)]).abs() < EPS);
                let ridge = if r == c { DIAG_RIDGE } else { 0.0 };
                assert!((sigma[(r, c)] - ridge - expected[j][r][c]).abs() < EPS);
            }
        }
    }
}

// A class with a single sample has a zero scatter matrix; the diagonal
// stabilization alone must keep it usable downstream.
#[test]
fn single_sample_class_still_invertible() {
    let y = DMatrix::from_row_slice(3, 2, &[
        0.0, 0.0,
        0.0, 1.0,
        5.0, 5.0
    ]);
    let lbl = vec![0, 0, 1];
    let model = ConditionalGaussian::fit(&y, &lbl, 2).unwrap();
    let covs = model.covariances();
    let sigma = &covs[1];
    for r in 0..2 {
        for c in 0..2 {
            let expected = if r == c { DIAG_RIDGE } else { 0.0 };
            assert!((sigma[(r, c)] - expected).abs() < EPS);
        }
    }
    let gen = model.generative_log_prob(y.slice((0, 0), y.shape())).unwrap();
    assert!(gen.iter().all(|g| g.is_finite() ));
}

#[test]
fn posterior_rows_normalize() {
    let (y, lbl) = small_sample();
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    assert!((model.prior().log_prob_class(0) + (3 as f64).ln()).abs() < EPS);
    let cond = model.conditional_log_prob(y.slice((0, 0), y.shape())).unwrap();
    for row in cond.row_iter() {
        let total : f64 = row.iter().map(|lp| lp.exp() ).sum();
        assert!((total - 1.0).abs() < 1E-6);
    }
}

#[test]
fn classifier_output_dimension_and_range() {
    let (y, lbl) = small_sample();
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    let pred = decision::classify(&model, y.slice((0, 0), y.shape())).unwrap();
    assert!(pred.len() == y.nrows());
    assert!(pred.iter().all(|p| *p < 3 ));
}

// The end-to-end scenario: two tight clusters far apart in the plane.
#[test]
fn two_cluster_scenario() {
    let y = DMatrix::from_row_slice(4, 2, &[
        0.0, 0.0,
        0.0, 1.0,
        10.0, 10.0,
        10.0, 11.0
    ]);
    let lbl = vec![0, 0, 1, 1];
    let model = ConditionalGaussian::fit(&y, &lbl, 2).unwrap();
    let means = model.means();
    assert!((means[(0, 0)] - 0.0).abs() < EPS && (means[(0, 1)] - 0.5).abs() < EPS);
    assert!((means[(1, 0)] - 10.0).abs() < EPS && (means[(1, 1)] - 10.5).abs() < EPS);
    let queries = DMatrix::from_row_slice(2, 2, &[
        0.0, 0.2,
        10.0, 10.8
    ]);
    let pred = decision::classify(&model, queries.slice((0, 0), queries.shape())).unwrap();
    assert!(pred == vec![0, 1]);
}

#[test]
fn tight_clusters_reach_unit_accuracy() {
    let centers = [
        [0.0, 0.0, 0.0],
        [40.0, 40.0, 40.0],
        [80.0, 0.0, 40.0]
    ];
    let n_per_class = 40;
    let mut y = DMatrix::zeros(3 * n_per_class, 3);
    let mut lbl = Vec::new();
    for (j, center) in centers.iter().enumerate() {
        let mn = MultiNormal::new(
            DVector::from_column_slice(center),
            DMatrix::identity(3, 3)
        ).unwrap();
        let draws = mn.sample(n_per_class);
        y.slice_mut((j * n_per_class, 0), (n_per_class, 3)).copy_from(&draws);
        lbl.extend(std::iter::repeat(j).take(n_per_class));
    }
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    let pred = decision::classify(&model, y.slice((0, 0), y.shape())).unwrap();
    assert!(decision::accuracy(&pred, &lbl) > 0.99);
}

#[test]
fn avg_log_prob_is_true_label_average() {
    let (y, lbl) = small_sample();
    let model = ConditionalGaussian::fit(&y, &lbl, 3).unwrap();
    let cond = model.conditional_log_prob(y.slice((0, 0), y.shape())).unwrap();
    let mut acc = 0.0;
    for (i, l) in lbl.iter().enumerate() {
        acc += cond[(i, *l)];
    }
    let avg = decision::avg_conditional_log_prob(
        &model,
        y.slice((0, 0), y.shape()),
        &lbl
    ).unwrap();
    assert!((avg - acc / lbl.len() as f64).abs() < EPS);
}

#[test]
fn empty_class_is_an_error() {
    let (y, _) = small_sample();
    let lbl = vec![0, 0, 0, 0, 2, 2];
    match ConditionalGaussian::fit(&y, &lbl, 3) {
        Err(Error::EmptyClass(1)) => { },
        other => panic!("expected EmptyClass(1), got {:?}", other.map(|_| () ))
    }
}

#[test]
fn label_out_of_range_is_an_error() {
    let (y, _) = small_sample();
    let lbl = vec![0, 0, 1, 1, 2, 3];
    match ConditionalGaussian::fit(&y, &lbl, 3) {
        Err(Error::LabelOutOfRange { label : 3, .. }) => { },
        other => panic!("expected LabelOutOfRange, got {:?}", other.map(|_| () ))
    }
}

#[test]
fn standard_normal_log_prob_matches_closed_form() {
    use std::f64::consts::PI;
    let mn = MultiNormal::new(DVector::zeros(3), DMatrix::identity(3, 3)).unwrap();
    let origin = DVector::<f64>::zeros(3);
    let lp = mn.log_prob(origin.rows(0, 3));
    assert!((lp + 1.5 * (2. * PI).ln()).abs() < EPS);
    let x = DVector::from_column_slice(&[1.0, 0.0, 0.0]);
    assert!((mn.log_prob(x.rows(0, 3)) - (lp - 0.5)).abs() < EPS);
}

#[test]
fn log_sum_exp_matches_direct_sum() {
    let x = DVector::from_column_slice(&[-1.0, 0.0, 2.5]);
    let direct : f64 = x.iter().map(|v| v.exp() ).sum();
    assert!((fit::log_sum_exp(&x) - direct.ln()).abs() < EPS);
    let degenerate = DVector::from_element(4, std::f64::NEG_INFINITY);
    assert!(fit::log_sum_exp(&degenerate) == std::f64::NEG_INFINITY);
}

#[test]
fn cov_diag_image_tiles() {
    let c0 = DMatrix::from_diagonal(&DVector::from_column_slice(&[1.0, 2.0, 3.0, 4.0]));
    let c1 = DMatrix::from_diagonal(&DVector::from_column_slice(&[5.0, 6.0, 7.0, 8.0]));
    let img = image::cov_diag_image(&[c0, c1], 2).unwrap();
    assert!(img.nrows() == 2 && img.ncols() == 4);
    assert!((img[(0, 0)] - 1f64.ln()).abs() < EPS);
    assert!((img[(0, 1)] - 2f64.ln()).abs() < EPS);
    assert!((img[(1, 0)] - 3f64.ln()).abs() < EPS);
    assert!((img[(1, 1)] - 4f64.ln()).abs() < EPS);
    assert!((img[(0, 2)] - 5f64.ln()).abs() < EPS);
    assert!((img[(1, 3)] - 8f64.ln()).abs() < EPS);
}

#[test]
fn dataset_roundtrip_from_dir() {
    let dir = std::env::temp_dir().join(format!("condgauss_data_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let train_x = DMatrix::from_row_slice(4, 2, &[
        0.0, 0.5,
        1.0, 1.5,
        2.0, 2.5,
        3.0, 3.5
    ]);
    let train_y = DMatrix::from_row_slice(4, 1, &[0.0, 0.0, 1.0, 1.0]);
    let test_x = DMatrix::from_row_slice(2, 2, &[
        0.5, 0.5,
        2.5, 2.5
    ]);
    let test_y = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
    table::save_matrix_to_file(&train_x, &dir.join("train_features.csv")).unwrap();
    table::save_matrix_to_file(&train_y, &dir.join("train_labels.csv")).unwrap();
    table::save_matrix_to_file(&test_x, &dir.join("test_features.csv")).unwrap();
    table::save_matrix_to_file(&test_y, &dir.join("test_labels.csv")).unwrap();
    let data = Dataset::load_all_data(&dir, 2).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();
    assert!((data.train_x.clone() - train_x).amax() < EPS);
    assert!((data.test_x.clone() - test_x).amax() < EPS);
    assert!(data.train_y == vec![0, 0, 1, 1]);
    assert!(data.test_y == vec![0, 1]);
}
