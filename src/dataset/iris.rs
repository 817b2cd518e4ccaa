use super::{Dataset, DatasetConfig, open, read_labelled_rows};
use crate::error::IoError;
use log::debug;

/// File name of the iris data inside the dataset directory
pub const IRIS_FILE: &str = "iris.csv";

/// Loads the Iris dataset and splits it into training and test sets
///
/// Reads `iris.csv` in the layout scikit-learn ships it: a header line
/// `150,4,setosa,versicolor,virginica` followed by rows of four measurements (sepal length,
/// sepal width, petal length, petal width in cm) and an integer species label in {0, 1, 2}.
///
/// # Parameters
///
/// - `config` - Dataset directory and split settings
///
/// # Returns
///
/// - `Result<Dataset<i64>, IoError>` - `(train_x, train_y, test_x, test_y)` with four feature columns
///
/// # Errors
///
/// - `IoError::StdIoError` - If the file cannot be opened
/// - `IoError::CsvError` / `IoError::FormatError` - If the file does not follow the layout above
///
/// # Example
///
/// ```rust,no_run
/// use kleinml::dataset::{DatasetConfig, load_iris};
///
/// let (train_x, train_y, test_x, test_y) = load_iris(&DatasetConfig::new("data")).unwrap();
/// assert_eq!(train_x.ncols(), 4);
/// assert_eq!(train_x.nrows() + test_x.nrows(), 150);
/// ```
pub fn load_iris(config: &DatasetConfig) -> Result<Dataset<i64>, IoError> {
    let reader = open(&config.file(IRIS_FILE))?;
    let (x, y) = read_labelled_rows(reader, b',', true)?;
    debug!("Loaded iris: {} samples, {} features", x.nrows(), x.ncols());
    config.split(x, y)
}
