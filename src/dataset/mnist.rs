use super::pickle::{self, Value};
use super::{Dataset, DatasetConfig, open_gz};
use crate::error::IoError;
use log::debug;
use ndarray::{Array1, Array2};

/// File name of the pickled MNIST data inside the dataset directory
pub const MNIST_FILE: &str = "mnist.pkl.gz";

/// Loads MNIST from the gzipped pickle distributed with the classic deep learning tutorials
///
/// `mnist.pkl.gz` holds a pickled tuple `(train_set, valid_set, test_set)` where each set is a
/// `(features, labels)` pair of numpy arrays: features are 784 floats in \[0, 1\] per image and
/// labels are digit classes. The file already comes split, so `config.test_size` and
/// `config.random_state` are ignored and the validation set is dropped.
///
/// # Parameters
///
/// - `config` - Dataset directory
///
/// # Returns
///
/// - `Result<Dataset<i64>, IoError>` - `(train_x, train_y, test_x, test_y)` taken from the train and test sets
///
/// # Errors
///
/// - `IoError::StdIoError` - If the file cannot be opened or decompressed
/// - `IoError::FormatError` - If the pickle does not have the structure described above
pub fn load_mnist(config: &DatasetConfig) -> Result<Dataset<i64>, IoError> {
    let reader = open_gz(&config.file(MNIST_FILE))?;
    let root = pickle::load(reader)?;

    let sets = root
        .as_tuple()
        .filter(|sets| sets.len() == 3)
        .ok_or_else(|| {
            IoError::FormatError("expected a (train, valid, test) tuple".to_string())
        })?;

    let (train_x, train_y) = labelled_set(&sets[0], "train")?;
    let (test_x, test_y) = labelled_set(&sets[2], "test")?;
    debug!(
        "Loaded MNIST: {} training and {} test images",
        train_x.nrows(),
        test_x.nrows()
    );

    Ok((train_x, train_y, test_x, test_y))
}

fn labelled_set(set: &Value, name: &str) -> Result<(Array2<f64>, Array1<i64>), IoError> {
    let arrays = set
        .as_tuple()
        .filter(|pair| pair.len() == 2)
        .and_then(|pair| Some((pair[0].as_array()?, pair[1].as_array()?)))
        .ok_or_else(|| {
            IoError::FormatError(format!("{} set is not a (features, labels) pair", name))
        })?;
    let (features, labels) = arrays;
    debug!(
        "MNIST {} set: features {:?}, labels {:?}",
        name,
        features.shape(),
        labels.shape()
    );

    let x = features.to_array2()?;
    let y = labels.to_labels()?;
    if x.nrows() != y.len() {
        return Err(IoError::FormatError(format!(
            "{} set has {} images but {} labels",
            name,
            x.nrows(),
            y.len()
        )));
    }

    Ok((x, Array1::from_vec(y)))
}
