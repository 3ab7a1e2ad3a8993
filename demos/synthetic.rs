use nalgebra::*;
use condgauss::distr::*;
use condgauss::fit::ConditionalGaussian;
use condgauss::decision;

// Draws three well-separated Gaussian clusters, fits the classifier on
// the draws and reports the training accuracy and posterior of a few
// probe points.
fn main() -> anyhow::Result<()> {
    let centers = [
        [0.0, 0.0],
        [10.0, 0.0],
        [5.0, 8.0]
    ];
    let n_per_class = 50;
    let mut y = DMatrix::zeros(3 * n_per_class, 2);
    let mut labels = Vec::new();
    for (j, center) in centers.iter().enumerate() {
        let mn = MultiNormal::new(
            DVector::from_column_slice(center),
            DMatrix::identity(2, 2)
        )?;
        y.slice_mut((j * n_per_class, 0), (n_per_class, 2))
            .copy_from(&mn.sample(n_per_class));
        labels.extend(std::iter::repeat(j).take(n_per_class));
    }

    let model = ConditionalGaussian::fit(&y, &labels, 3)?;
    let pred = decision::classify(&model, y.slice((0, 0), y.shape()))?;
    println!("Training accuracy: {:.4}", decision::accuracy(&pred, &labels));
    println!("Class means:\n{:.3}", model.means());

    let probes = DMatrix::from_row_slice(3, 2, &[
        0.5, 0.5,
        9.0, 1.0,
        5.0, 7.0
    ]);
    let cond = model.conditional_log_prob(probes.slice((0, 0), probes.shape()))?;
    for (i, row) in cond.row_iter().enumerate() {
        let post : Vec<f64> = row.iter().map(|lp| lp.exp() ).collect();
        println!("Probe {} posterior: {:?}", i, post);
    }
    Ok(())
}
