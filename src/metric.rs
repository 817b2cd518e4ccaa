use ahash::AHashSet;
use ndarray::Data;
use ndarray::prelude::*;
use std::hash::Hash;

/// Builds a multi-class confusion matrix from true and predicted class indices.
///
/// Cell `[t, p]` counts how many samples have true class `t` and predicted class `p`.
/// Labels are used directly as zero-based row/column indices and may be of any integer type,
/// so the `i64` labels returned by the dataset loaders can be passed as they are.
///
/// # Parameters
///
/// - `true_y` - Ground-truth class index of each sample
/// - `pred_y` - Predicted class index of each sample
/// - `nc` - Number of classes. When `None`, it is the number of distinct values in `true_y`
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use kleinml::metric::confusion_matrix;
///
/// let true_y = array![0i64, 1, 1, 0];
/// let pred_y = array![0i64, 1, 0, 0];
/// let cm = confusion_matrix(&true_y, &pred_y, None);
/// assert_eq!(cm, array![[2usize, 0], [1, 1]]);
/// ```
///
/// # Returns
///
/// - `Array2<usize>` - Matrix of shape `(nc, nc)`
///
/// # Panics
///
/// - Panics if the two arrays have different lengths
/// - Panics if a label is negative or not in `0..nc`
pub fn confusion_matrix<A, S1, S2>(
    true_y: &ArrayBase<S1, Ix1>,
    pred_y: &ArrayBase<S2, Ix1>,
    nc: Option<usize>,
) -> Array2<usize>
where
    A: Copy + Eq + Hash + std::fmt::Debug + TryInto<usize>,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
{
    if true_y.len() != pred_y.len() {
        panic!(
            "True label set and predicted label set dimension does not match. True: {}, Predicted: {}",
            true_y.len(),
            pred_y.len()
        );
    }

    let nc = nc.unwrap_or_else(|| true_y.iter().collect::<AHashSet<_>>().len());

    let mut cm = Array2::<usize>::zeros((nc, nc));
    for (&t, &p) in true_y.iter().zip(pred_y.iter()) {
        cm[[class_index(t), class_index(p)]] += 1;
    }

    cm
}

fn class_index<A: Copy + std::fmt::Debug + TryInto<usize>>(label: A) -> usize {
    match label.try_into() {
        Ok(index) => index,
        Err(_) => panic!("Class label {:?} is not a valid class index", label),
    }
}

/// Calculates the precision of one class from a confusion matrix.
///
/// Precision is `cm[label, label]` divided by the sum of column `label`, i.e. the share of
/// samples predicted as `label` that really belong to it.
///
/// # Parameters
///
/// - `label` - Class index to evaluate
/// - `confusion_matrix` - Matrix produced by [`confusion_matrix`]
///
/// # Returns
///
/// - `f64` - Precision of the class. A column that sums to zero is not special-cased, so
///   the result is `NaN`
///
/// # Panics
///
/// - Panics if `label` is out of range for the matrix
pub fn precision<S>(label: usize, confusion_matrix: &ArrayBase<S, Ix2>) -> f64
where
    S: Data<Elem = usize>,
{
    let col_sum: usize = confusion_matrix.column(label).sum();
    confusion_matrix[[label, label]] as f64 / col_sum as f64
}

/// Calculates the recall of one class from a confusion matrix.
///
/// Recall is `cm[label, label]` divided by the sum of row `label`, i.e. the share of
/// samples of class `label` that were predicted correctly.
///
/// # Parameters
///
/// - `label` - Class index to evaluate
/// - `confusion_matrix` - Matrix produced by [`confusion_matrix`]
///
/// # Returns
///
/// - `f64` - Recall of the class (`NaN` when the row sums to zero)
///
/// # Panics
///
/// - Panics if `label` is out of range for the matrix
pub fn recall<S>(label: usize, confusion_matrix: &ArrayBase<S, Ix2>) -> f64
where
    S: Data<Elem = usize>,
{
    let row_sum: usize = confusion_matrix.row(label).sum();
    confusion_matrix[[label, label]] as f64 / row_sum as f64
}

/// Calculates the overall accuracy encoded by a confusion matrix.
///
/// # Parameters
///
/// - `confusion_matrix` - Matrix produced by [`confusion_matrix`]
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use kleinml::metric::accuracy;
///
/// let cm = array![[2usize, 0], [1, 1]];
/// assert_eq!(accuracy(&cm), 0.75);
/// ```
///
/// # Returns
///
/// - `f64` - Trace divided by the sum of all cells (`NaN` for an all-zero matrix)
pub fn accuracy<S>(confusion_matrix: &ArrayBase<S, Ix2>) -> f64
where
    S: Data<Elem = usize>,
{
    let diagonal_sum: usize = confusion_matrix.diag().sum();
    let total: usize = confusion_matrix.sum();
    diagonal_sum as f64 / total as f64
}

/// Calculates the fraction of positions where the true and predicted labels are equal.
///
/// # Parameters
///
/// - `true_y` - Ground-truth labels
/// - `pred_y` - Predicted labels
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use kleinml::metric::accuracy_score;
///
/// let score = accuracy_score(&array![1, 0, 1, 1], &array![1, 0, 0, 1]);
/// assert_eq!(score, 0.75);
/// ```
///
/// # Returns
///
/// - `f64` - Accuracy in \[0.0, 1.0\] (`NaN` for empty inputs)
///
/// # Panics
///
/// - Panics if the two arrays have different lengths
pub fn accuracy_score<A, S1, S2>(true_y: &ArrayBase<S1, Ix1>, pred_y: &ArrayBase<S2, Ix1>) -> f64
where
    A: PartialEq,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
{
    if true_y.len() != pred_y.len() {
        panic!(
            "True label set and predicted label set dimension does not match. True: {}, Predicted: {}",
            true_y.len(),
            pred_y.len()
        );
    }

    let count = true_y
        .iter()
        .zip(pred_y.iter())
        .filter(|(t, p)| t == p)
        .count();

    count as f64 / true_y.len() as f64
}
