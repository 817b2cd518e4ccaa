/// Error types shared by every module of the crate
pub mod error;

pub use error::{IoError, ModelError};

/// Traits implemented by loss functions and activation functions
#[cfg(feature = "neural_network")]
pub mod traits;

/// Loss functions and activation functions for hand-written neural networks.
///
/// Every component is a stateless value that maps tensors to tensors of the same shape.
/// Each variant is available both as a unit struct implementing the trait and as a variant of
/// a tagged enum, for code that chooses the function at runtime.
///
/// # Loss Functions
/// - **SquareLoss**: `0.5 * (y_true - y_pred)^2`, gradient `y_pred - y_true`
/// - **CrossEntropy**: binary cross entropy with predictions clamped into `[1e-15, 1 - 1e-15]`
///
/// # Activation Functions
/// - **Sigmoid**: `1 / (1 + e^(-x))`
/// - **Softmax**: normalised exponentials along the last axis
/// - **ReLU**: `x` for `x >= 0`, else 0
/// - **TanH**: `2 / (1 + e^(-2x)) - 1`
///
/// # Examples
/// ```rust
/// use kleinml::neural_network::*;
/// use ndarray::array;
///
/// let logits = array![[1.0, 2.0, 3.0]].into_dyn();
/// let probabilities = Softmax.evaluate(&logits);
///
/// let target = array![[0.0, 0.0, 1.0]].into_dyn();
/// let grad = CrossEntropy.gradient(&target, &probabilities);
/// assert_eq!(grad.shape(), &[1, 3]);
/// ```
#[cfg(feature = "neural_network")]
pub mod neural_network;

/// Classification metrics computed from label arrays or a multi-class confusion matrix.
///
/// # Functions
/// - **confusion_matrix**: `nc x nc` count matrix indexed by (true class, predicted class)
/// - **precision**: diagonal cell over its column sum
/// - **recall**: diagonal cell over its row sum
/// - **accuracy**: trace over total
/// - **accuracy_score**: fraction of equal labels, computed directly from two label arrays
///
/// Length mismatches panic. Zero denominators are left to IEEE arithmetic and return `NaN`.
///
/// # Examples
/// ```rust
/// use kleinml::metric::*;
/// use ndarray::array;
///
/// let cm = confusion_matrix(&array![0, 1, 1, 0], &array![0, 1, 0, 0], None);
/// assert_eq!(accuracy(&cm), 0.75);
/// assert_eq!(precision(1, &cm), 1.0);
/// assert_eq!(recall(1, &cm), 0.5);
/// ```
#[cfg(feature = "metric")]
pub mod metric;

/// Data preparation helpers for classifier exercises.
///
/// # Functions
/// - **vbind**: append a label column to a feature matrix
/// - **split_by_class**: group feature rows by label, preserving row and label order
/// - **binclass_svm_split**: reduce a multi-class train/test pair to a {-1, +1} problem
/// - **train_test_split**: shuffled, seedable train/test split
/// - **implot**: render an image array to a PNG file
///
/// # Examples
/// ```rust
/// use kleinml::utility::*;
/// use ndarray::array;
///
/// let train_x = array![[0.0], [0.1], [1.0], [1.1], [5.0]];
/// let train_y = array![0, 0, 1, 1, 2];
/// let test_x = array![[0.2], [0.9]];
/// let test_y = array![0, 1];
///
/// let (x, y, _, _) = binclass_svm_split(&train_x, &train_y, &test_x, &test_y, None, None).unwrap();
/// assert_eq!(x.nrows(), 4);
/// assert_eq!(y, array![-1.0, -1.0, 1.0, 1.0]);
/// ```
#[cfg(feature = "utility")]
pub mod utility;

/// Loaders for the datasets used in the exercises.
///
/// Every loader reads files from the directory given in a [`dataset::DatasetConfig`] and returns
/// `(train_x, train_y, test_x, test_y)`, shuffled and split 80/20 unless the file already comes
/// split.
///
/// # Available Datasets
/// - **iris**: `iris.csv`, 150 samples, 4 features, 3 classes
/// - **breast_cancer**: `breast_cancer.csv`, 569 samples, 30 features, 2 classes
/// - **digits**: `digits.csv.gz`, 8x8 digit images, 10 classes
/// - **diabetes**: `diabetes_data_raw.csv.gz` + `diabetes_target.csv.gz`, regression
/// - **mnist**: `mnist.pkl.gz`, pickled numpy arrays, 28x28 digit images
/// - **rbf**: `testSetRBF.txt`, 2 features, {-1, +1} labels
/// - **hiragana**: `hiragana_x.dat` + `hiragana_y.dat`, raw 32x32 `f32` images with `i64` labels
///
/// # Examples
/// ```rust,no_run
/// use kleinml::dataset::{DatasetConfig, load_iris};
///
/// let config = DatasetConfig::new("data").with_random_state(7);
/// let (train_x, train_y, test_x, test_y) = load_iris(&config).unwrap();
/// println!("{} training samples", train_x.nrows());
/// ```
#[cfg(feature = "dataset")]
pub mod dataset;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
///
/// # Examples
/// ```rust
/// use kleinml::prelude::*;
/// ```
pub mod prelude;
