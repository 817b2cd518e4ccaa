use super::{Dataset, DatasetConfig, open_gz, read_labelled_rows};
use crate::error::IoError;
use log::debug;

/// File name of the gzipped digits data inside the dataset directory
pub const DIGITS_FILE: &str = "digits.csv.gz";

/// Loads the 8x8 handwritten digits dataset and splits it into training and test sets
///
/// `digits.csv.gz` holds one sample per line: 64 pixel intensities in \[0, 16\] followed by the
/// digit label, comma separated, without a header.
///
/// # Parameters
///
/// - `config` - Dataset directory and split settings
///
/// # Returns
///
/// - `Result<Dataset<i64>, IoError>` - `(train_x, train_y, test_x, test_y)` with 64 feature columns
pub fn load_digits(config: &DatasetConfig) -> Result<Dataset<i64>, IoError> {
    let reader = open_gz(&config.file(DIGITS_FILE))?;
    let (x, y) = read_labelled_rows(reader, b',', false)?;
    debug!("Loaded digits: {} samples, {} features", x.nrows(), x.ncols());
    config.split(x, y)
}
