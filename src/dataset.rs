/// This module provides access to the breast cancer dataset
pub mod breast_cancer;
/// This module provides access to the diabetes regression dataset
pub mod diabetes;
/// This module provides access to the handwritten digits (8x8) dataset
pub mod digits;
/// This module provides access to the hiragana character dataset
pub mod hiragana;
/// This module provides access to the iris dataset
pub mod iris;
/// This module provides access to the MNIST dataset stored as a gzipped pickle
pub mod mnist;
/// Internal pickle decoder used by the MNIST loader
pub(crate) mod pickle;
/// This module provides access to the two-feature RBF kernel test set
pub mod rbf;

pub use breast_cancer::*;
pub use diabetes::*;
pub use digits::*;
pub use hiragana::*;
pub use iris::*;
pub use mnist::*;
pub use rbf::*;

use crate::error::IoError;
use crate::utility::train_test_split::train_test_split;
use flate2::read::GzDecoder;
use log::debug;
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// A dataset split into training and test parts: `(train_x, train_y, test_x, test_y)`
pub type Dataset<L> = (Array2<f64>, Array1<L>, Array2<f64>, Array1<L>);

/// Where dataset files live and how loaded data is split.
///
/// # Fields
///
/// - `base_path` - Directory containing the dataset files
/// - `test_size` - Fraction of samples put in the test split, default is 0.2
/// - `random_state` - Seed for the shuffle before splitting, default is None (non-deterministic)
///
/// # Example
///
/// ```rust
/// use kleinml::dataset::DatasetConfig;
///
/// let config = DatasetConfig::new("data").with_random_state(42);
/// assert_eq!(config.test_size(), 0.2);
/// assert_eq!(config.random_state(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    base_path: PathBuf,
    test_size: f64,
    random_state: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            base_path: PathBuf::from("data"),
            test_size: 0.2,
            random_state: None,
        }
    }
}

impl DatasetConfig {
    /// Creates a configuration reading files from `base_path` with an 80/20 split.
    ///
    /// # Parameters
    ///
    /// - `base_path` - Directory containing the dataset files
    ///
    /// # Returns
    ///
    /// - `Self` - A new `DatasetConfig` instance
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        DatasetConfig {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Sets the fraction of samples put in the test split.
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Sets the seed used to shuffle samples before splitting.
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    pub fn random_state(&self) -> Option<u64> {
        self.random_state
    }

    fn file(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Shuffles and splits loaded data, reordering to `(train_x, train_y, test_x, test_y)`.
    fn split<L: Clone>(&self, x: Array2<f64>, y: Array1<L>) -> Result<Dataset<L>, IoError> {
        let (x_train, x_test, y_train, y_test) =
            train_test_split(x, y, Some(self.test_size), self.random_state)?;
        debug!(
            "Split dataset into {} training and {} test samples",
            x_train.nrows(),
            x_test.nrows()
        );
        Ok((x_train, y_train, x_test, y_test))
    }
}

fn open(path: &Path) -> Result<BufReader<File>, IoError> {
    debug!("Opening {}", path.display());
    IoError::load_in_buf_reader(path)
}

fn open_gz(path: &Path) -> Result<BufReader<GzDecoder<BufReader<File>>>, IoError> {
    Ok(BufReader::new(GzDecoder::new(open(path)?)))
}

/// Parses an integer class label, accepting integral floats such as `1.0` or `-1.000000`.
fn parse_label(field: &str) -> Result<i64, IoError> {
    if let Ok(label) = field.parse::<i64>() {
        return Ok(label);
    }
    match field.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 => Ok(v as i64),
        _ => Err(IoError::FormatError(format!(
            "'{}' is not an integer class label",
            field
        ))),
    }
}

fn parse_feature(field: &str) -> Result<f64, IoError> {
    field
        .parse::<f64>()
        .map_err(|_| IoError::FormatError(format!("'{}' is not a number", field)))
}

fn to_matrix(values: Vec<f64>, n_rows: usize, n_cols: usize) -> Result<Array2<f64>, IoError> {
    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| IoError::FormatError(e.to_string()))
}

/// Reads delimited rows made of feature columns followed by one integer label column.
///
/// With `header`, the first record must start with `n_samples,n_features` (the layout of the
/// CSV files bundled with scikit-learn) and both counts are checked.
fn read_labelled_rows<R: Read>(
    reader: R,
    delimiter: u8,
    header: bool,
) -> Result<(Array2<f64>, Array1<i64>), IoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let mut expected_samples = None;
    let mut n_features = None;
    if header {
        let record = records
            .next()
            .ok_or_else(|| IoError::FormatError("missing header line".to_string()))??;
        let count = |i: usize| {
            record
                .get(i)
                .and_then(|f| f.parse::<usize>().ok())
                .ok_or_else(|| IoError::FormatError(format!("bad header line {:?}", record)))
        };
        expected_samples = Some(count(0)?);
        n_features = Some(count(1)?);
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for result in records {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let width = *n_features.get_or_insert(record.len().saturating_sub(1));
        if record.len() != width + 1 || width == 0 {
            return Err(IoError::FormatError(format!(
                "row {} has {} fields, expected {}",
                labels.len() + 1,
                record.len(),
                width + 1
            )));
        }

        for field in record.iter().take(width) {
            features.push(parse_feature(field)?);
        }
        labels.push(parse_label(&record[width])?);
    }

    if let Some(expected) = expected_samples {
        if expected != labels.len() {
            return Err(IoError::FormatError(format!(
                "header announces {} samples, found {}",
                expected,
                labels.len()
            )));
        }
    }

    let n_rows = labels.len();
    let x = to_matrix(features, n_rows, n_features.unwrap_or(0))?;
    Ok((x, Array1::from_vec(labels)))
}

/// Reads a whitespace separated numeric table, returning the values and the column count.
fn read_whitespace_table<R: BufRead>(reader: R) -> Result<(Vec<f64>, usize, usize), IoError> {
    let mut values = Vec::new();
    let mut n_cols = None;
    let mut n_rows = 0;

    for line in reader.lines() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let width = *n_cols.get_or_insert(fields.len());
        if fields.len() != width {
            return Err(IoError::FormatError(format!(
                "row {} has {} columns, expected {}",
                n_rows + 1,
                fields.len(),
                width
            )));
        }
        for field in fields {
            values.push(parse_feature(field)?);
        }
        n_rows += 1;
    }

    Ok((values, n_rows, n_cols.unwrap_or(0)))
}
