use super::{Dataset, DatasetConfig, open_gz, read_whitespace_table, to_matrix};
use crate::error::IoError;
use log::debug;
use ndarray::{Array1, Array2, Axis};

/// File name of the gzipped diabetes features inside the dataset directory
pub const DIABETES_DATA_FILE: &str = "diabetes_data_raw.csv.gz";

/// File name of the gzipped diabetes targets inside the dataset directory
pub const DIABETES_TARGET_FILE: &str = "diabetes_target.csv.gz";

/// Loads the diabetes regression dataset and splits it into training and test sets
///
/// Features come from `diabetes_data_raw.csv.gz` (442 rows of 10 whitespace separated baseline
/// variables: age, sex, bmi, bp and six blood serum measurements). Targets come from
/// `diabetes_target.csv.gz`, a quantitative measure of disease progression one year later.
///
/// Each feature column is mean centred and divided by its L2 norm (standard deviation times
/// `sqrt(n_samples)`), so every column has a sum of squares of 1.
///
/// # Parameters
///
/// - `config` - Dataset directory and split settings
///
/// # Returns
///
/// - `Result<Dataset<f64>, IoError>` - `(train_x, train_y, test_x, test_y)` with real-valued targets
///
/// # Errors
///
/// - `IoError::StdIoError` - If either file cannot be opened or decompressed
/// - `IoError::FormatError` - If a value is not numeric or feature and target counts differ
pub fn load_diabetes(config: &DatasetConfig) -> Result<Dataset<f64>, IoError> {
    let (values, n_rows, n_cols) =
        read_whitespace_table(open_gz(&config.file(DIABETES_DATA_FILE))?)?;
    let mut x = to_matrix(values, n_rows, n_cols)?;

    let (targets, n_targets, _) =
        read_whitespace_table(open_gz(&config.file(DIABETES_TARGET_FILE))?)?;
    if targets.len() != n_rows {
        return Err(IoError::FormatError(format!(
            "diabetes has {} feature rows but {} targets in {} lines",
            n_rows,
            targets.len(),
            n_targets
        )));
    }

    scale_columns(&mut x);
    debug!("Loaded diabetes: {} samples, {} features", n_rows, n_cols);
    config.split(x, Array1::from_vec(targets))
}

fn scale_columns(x: &mut Array2<f64>) {
    for mut column in x.axis_iter_mut(Axis(1)) {
        let mean = column.mean().unwrap_or(0.0);
        column.mapv_inplace(|v| v - mean);
        let norm = column.dot(&column).sqrt();
        if norm > 0.0 {
            column.mapv_inplace(|v| v / norm);
        }
    }
}
