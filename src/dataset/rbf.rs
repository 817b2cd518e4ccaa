use super::{Dataset, DatasetConfig, open, read_labelled_rows};
use crate::error::IoError;
use log::debug;

/// File name of the RBF test set inside the dataset directory
pub const RBF_FILE: &str = "testSetRBF.txt";

/// Loads the two-feature dataset used to exercise RBF kernels
///
/// Every line of `testSetRBF.txt` is `x1 \t x2 \t label`.
///
/// # Parameters
///
/// - `config` - Dataset directory and split settings
///
/// # Returns
///
/// - `Result<Dataset<i64>, IoError>` - `(train_x, train_y, test_x, test_y)` with two feature columns
pub fn load_rbf(config: &DatasetConfig) -> Result<Dataset<i64>, IoError> {
    let reader = open(&config.file(RBF_FILE))?;
    let (x, y) = read_labelled_rows(reader, b'\t', false)?;
    if x.ncols() != 2 {
        return Err(IoError::FormatError(format!(
            "RBF rows must hold 2 features, found {}",
            x.ncols()
        )));
    }
    debug!("Loaded RBF test set: {} samples", x.nrows());
    config.split(x, y)
}
