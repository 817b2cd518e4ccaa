use crate::error::ModelError;
use ndarray::{Array1, Array2, Axis};
use rand::{SeedableRng, rng, rngs::StdRng, seq::SliceRandom};

/// A shuffled train/test split: `(x_train, x_test, y_train, y_test)`
pub type TrainTestSplit<T> = (Array2<f64>, Array2<f64>, Array1<T>, Array1<T>);

/// Splits a dataset into training and test sets
///
/// Rows are shuffled before splitting, so class order in the input does not leak into
/// either split. Labels may be of any clonable type (integer classes, float targets, ...).
///
/// The test set holds `ceil(n_samples * test_size)` rows, kept within `1..n_samples` so
/// neither split is empty. For 442 samples and `test_size = 0.2` that is 89 test rows.
///
/// # Parameters
///
/// - `x` - Feature matrix with shape (n_samples, n_features)
/// - `y` - Target values with shape (n_samples)
/// - `test_size` - Fraction of samples in the test set, default is 0.3
/// - `random_state` - Seed for the shuffle, default is None (seeded from the thread RNG)
///
/// # Returns
///
/// - `Result<TrainTestSplit<T>, ModelError>` - `(x_train, x_test, y_train, y_test)`
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If there are fewer than 2 samples, if `x` and `y`
///   have different lengths, or if `test_size` is not strictly between 0 and 1
///
/// # Example
/// ```rust
/// use ndarray::{Array1, Array2};
/// use kleinml::utility::train_test_split::train_test_split;
///
/// let x = Array2::from_shape_vec((5, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// let y = Array1::from(vec![0, 1, 0, 1, 0]);
/// let (x_train, x_test, y_train, y_test) = train_test_split(x, y, Some(0.4), Some(42)).unwrap();
/// assert_eq!(x_train.nrows(), 3);
/// assert_eq!(y_test.len(), 2);
/// ```
pub fn train_test_split<T: Clone>(
    x: Array2<f64>,
    y: Array1<T>,
    test_size: Option<f64>,
    random_state: Option<u64>,
) -> Result<TrainTestSplit<T>, ModelError> {
    if x.nrows() != y.len() {
        return Err(ModelError::InputValidationError(format!(
            "x and y must have the same number of samples, x rows: {}, y length: {}",
            x.nrows(),
            y.len()
        )));
    }

    let n_test = test_count(x.nrows(), test_size.unwrap_or(0.3))?;
    let indices = shuffled_indices(x.nrows(), random_state);
    let (test_rows, train_rows) = indices.split_at(n_test);

    Ok((
        x.select(Axis(0), train_rows),
        x.select(Axis(0), test_rows),
        y.select(Axis(0), train_rows),
        y.select(Axis(0), test_rows),
    ))
}

fn test_count(n_samples: usize, test_size: f64) -> Result<usize, ModelError> {
    if n_samples < 2 {
        return Err(ModelError::InputValidationError(format!(
            "Cannot split {} sample(s) into non-empty train and test sets",
            n_samples
        )));
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ModelError::InputValidationError(format!(
            "test_size must be between 0 and 1 (exclusive), got {}",
            test_size
        )));
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    Ok(n_test.clamp(1, n_samples - 1))
}

fn shuffled_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    match random_state {
        Some(seed) => indices.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => indices.shuffle(&mut rng()),
    }
    indices
}
