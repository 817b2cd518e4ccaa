use crate::error::ModelError;
use ahash::RandomState;
use indexmap::IndexMap;
use log::warn;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, concatenate};
use std::fmt::Debug;
use std::hash::Hash;

/// Binary SVM dataset returned by [`binclass_svm_split`]: `(train_x, train_y, test_x, test_y)`
/// with labels in {-1.0, +1.0}.
pub type BinaryDataset = (Array2<f64>, Array1<f64>, Array2<f64>, Array1<f64>);

/// Rows of each class keyed by label, iterating in the order labels were first seen.
pub type ClassMap<L> = IndexMap<L, Array2<f64>, RandomState>;

/// Groups the rows of a feature matrix by their label.
///
/// # Parameters
///
/// - `feature` - Feature matrix with shape (n_samples, n_features)
/// - `label` - Label of each row
///
/// # Returns
///
/// - `Result<ClassMap<L>, ModelError>` - For every distinct label, the rows carrying that
///   label, stacked in the order they appear in `feature`. Labels iterate in first-seen order
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If the number of rows and labels differ
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use kleinml::utility::class_split::split_by_class;
///
/// let feature = array![[1.0], [2.0], [3.0]];
/// let label = array![0, 1, 0];
/// let classes = split_by_class(&feature, &label).unwrap();
///
/// assert_eq!(classes[&0], array![[1.0], [3.0]]);
/// assert_eq!(classes[&1], array![[2.0]]);
/// assert_eq!(classes.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
/// ```
pub fn split_by_class<L, S1, S2>(
    feature: &ArrayBase<S1, Ix2>,
    label: &ArrayBase<S2, Ix1>,
) -> Result<ClassMap<L>, ModelError>
where
    L: Eq + Hash + Clone,
    S1: Data<Elem = f64>,
    S2: Data<Elem = L>,
{
    if feature.nrows() != label.len() {
        return Err(ModelError::InputValidationError(format!(
            "Feature vector and label dimension does not match, feature rows: {}, label length: {}",
            feature.nrows(),
            label.len()
        )));
    }

    let mut row_indices: IndexMap<L, Vec<usize>, RandomState> = IndexMap::default();
    for (i, l) in label.iter().enumerate() {
        row_indices.entry(l.clone()).or_default().push(i);
    }

    Ok(row_indices
        .into_iter()
        .map(|(l, indices)| (l, feature.select(Axis(0), &indices)))
        .collect())
}

/// Builds a binary {-1, +1} SVM problem out of two classes of a multi-class dataset.
///
/// Both splits are grouped with [`split_by_class`]; the rows of class `c1` come first and are
/// labelled `-1.0`, followed by the rows of class `c2` labelled `+1.0`. Every other class is
/// dropped.
///
/// # Parameters
///
/// - `train_x` / `train_y` - Training features and labels
/// - `test_x` / `test_y` - Test features and labels
/// - `c1` - Class mapped to `-1.0`, default is 0
/// - `c2` - Class mapped to `+1.0`, default is 1
///
/// # Returns
///
/// - `Result<BinaryDataset, ModelError>` - `(train_x, train_y, test_x, test_y)` restricted to the two classes
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If a feature/label pair has mismatched lengths
/// - `ModelError::MissingClass` - If `c1` or `c2` does not occur in the training or test labels
pub fn binclass_svm_split<L, S1, S2, S3, S4>(
    train_x: &ArrayBase<S1, Ix2>,
    train_y: &ArrayBase<S2, Ix1>,
    test_x: &ArrayBase<S3, Ix2>,
    test_y: &ArrayBase<S4, Ix1>,
    c1: Option<L>,
    c2: Option<L>,
) -> Result<BinaryDataset, ModelError>
where
    L: Eq + Hash + Clone + Debug + From<u8>,
    S1: Data<Elem = f64>,
    S2: Data<Elem = L>,
    S3: Data<Elem = f64>,
    S4: Data<Elem = L>,
{
    if train_x.nrows() != train_y.len() {
        return Err(ModelError::InputValidationError(format!(
            "Training feature vector and label dimension does not match, rows: {}, labels: {}",
            train_x.nrows(),
            train_y.len()
        )));
    }
    if test_x.nrows() != test_y.len() {
        return Err(ModelError::InputValidationError(format!(
            "Testing feature vector and label dimension does not match, rows: {}, labels: {}",
            test_x.nrows(),
            test_y.len()
        )));
    }

    let c1 = c1.unwrap_or_else(|| L::from(0));
    let c2 = c2.unwrap_or_else(|| L::from(1));

    let train_classes = split_by_class(train_x, train_y)?;
    let test_classes = split_by_class(test_x, test_y)?;

    let (train_x, train_y) = join_pair(&train_classes, &c1, &c2, "training")?;
    let (test_x, test_y) = join_pair(&test_classes, &c1, &c2, "testing")?;

    Ok((train_x, train_y, test_x, test_y))
}

fn join_pair<L>(
    classes: &ClassMap<L>,
    c1: &L,
    c2: &L,
    split_name: &str,
) -> Result<(Array2<f64>, Array1<f64>), ModelError>
where
    L: Eq + Hash + Debug,
{
    let lookup = |c: &L| {
        classes.get(c).ok_or_else(|| {
            warn!("Class {:?} not present in {} labels", c, split_name);
            ModelError::MissingClass(format!("class {:?} not found in {} labels", c, split_name))
        })
    };

    let negative = lookup(c1)?;
    let positive = lookup(c2)?;

    let x = concatenate(Axis(0), &[negative.view(), positive.view()])?;
    let y = std::iter::repeat_n(-1.0, negative.nrows())
        .chain(std::iter::repeat_n(1.0, positive.nrows()))
        .collect::<Array1<f64>>();

    Ok((x, y))
}
