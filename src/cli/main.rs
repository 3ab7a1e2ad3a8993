use structopt::*;
use anyhow::Context;
use std::path::PathBuf;
use condgauss::fit::ConditionalGaussian;
use condgauss::decision::Report;
use condgauss::table::{self, Dataset};
use condgauss::image;

/// Fit and evaluate the conditional Gaussian digit classifier from the command line
#[derive(StructOpt, Debug)]
pub enum CondGauss {

    /// Fits the model on the training partition and prints the
    /// evaluation report (log-likelihoods and accuracies).
    Eval {
        /// Directory holding train/test feature and label CSV files
        data : PathBuf,

        /// Number of classes
        #[structopt(short, long, default_value = "10")]
        classes : usize,

        /// Emits the report as JSON instead of plain text
        #[structopt(long)]
        json : bool,

        #[structopt(short)]
        output : Option<PathBuf>
    },

    /// Writes the per-class covariance log-diagonals, tiled side by side,
    /// as a CSV matrix for an external plotter.
    CovImage {
        /// Directory holding train/test feature and label CSV files
        data : PathBuf,

        /// Number of classes
        #[structopt(short, long, default_value = "10")]
        classes : usize,

        /// Tile side; the feature dimension must equal side²
        #[structopt(short, long, default_value = "8")]
        side : usize,

        #[structopt(short)]
        output : Option<PathBuf>
    }

}

fn fit_from_dir(dir : &PathBuf, classes : usize) -> anyhow::Result<(Dataset, ConditionalGaussian)> {
    let data = Dataset::load_all_data(dir, classes)
        .with_context(|| format!("Error opening dataset at {}", dir.display()) )?;
    let model = ConditionalGaussian::fit(&data.train_x, &data.train_y, classes)
        .context("Error fitting the model")?;
    Ok((data, model))
}

fn print_or_save(content : &str, opt_path : &Option<PathBuf>) -> anyhow::Result<()> {
    match opt_path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Error writing to {}", path.display()) ),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    match CondGauss::from_args() {
        CondGauss::Eval { data, classes, json, output } => {
            let (data, model) = fit_from_dir(&data, classes)?;
            let report = Report::evaluate(&model, &data)?;
            let content = match json {
                true => serde_json::to_string_pretty(&report)?,
                false => format!("{}", report)
            };
            print_or_save(&content, &output)
        },
        CondGauss::CovImage { data, classes, side, output } => {
            let (_, model) = fit_from_dir(&data, classes)?;
            let img = image::cov_diag_image(&model.covariances(), side)?;
            print_or_save(&table::build_string_packed(&img), &output)
        }
    }
}
