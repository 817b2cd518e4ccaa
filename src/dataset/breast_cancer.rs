use super::{Dataset, DatasetConfig, open, read_labelled_rows};
use crate::error::IoError;
use log::debug;

/// File name of the breast cancer data inside the dataset directory
pub const BREAST_CANCER_FILE: &str = "breast_cancer.csv";

/// Loads the Wisconsin breast cancer dataset and splits it into training and test sets
///
/// Reads `breast_cancer.csv` (header `569,30,malignant,benign`, then 30 real-valued features
/// and a 0/1 label per row).
///
/// # Parameters
///
/// - `config` - Dataset directory and split settings
///
/// # Returns
///
/// - `Result<Dataset<i64>, IoError>` - `(train_x, train_y, test_x, test_y)`, 0 = malignant, 1 = benign
pub fn load_breast_cancer(config: &DatasetConfig) -> Result<Dataset<i64>, IoError> {
    let reader = open(&config.file(BREAST_CANCER_FILE))?;
    let (x, y) = read_labelled_rows(reader, b',', true)?;
    debug!(
        "Loaded breast cancer: {} samples, {} features",
        x.nrows(),
        x.ncols()
    );
    config.split(x, y)
}
