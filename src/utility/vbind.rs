use crate::error::ModelError;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix1, Ix2, concatenate};

/// Appends a label column to the right of a feature matrix.
///
/// # Parameters
///
/// - `feature` - Feature matrix with shape (n_samples, n_features)
/// - `label` - Label of each row
///
/// # Returns
///
/// - `Result<Array2<f64>, ModelError>` - Matrix with shape (n_samples, n_features + 1) whose last column is `label`
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If the number of rows and labels differ
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use kleinml::utility::vbind::vbind;
///
/// let bound = vbind(&array![[1.0, 2.0], [3.0, 4.0]], &array![0.0, 1.0]).unwrap();
/// assert_eq!(bound, array![[1.0, 2.0, 0.0], [3.0, 4.0, 1.0]]);
/// ```
pub fn vbind<S1, S2>(
    feature: &ArrayBase<S1, Ix2>,
    label: &ArrayBase<S2, Ix1>,
) -> Result<Array2<f64>, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if feature.nrows() != label.len() {
        return Err(ModelError::InputValidationError(format!(
            "Feature rows and label length must match, feature rows: {}, label length: {}",
            feature.nrows(),
            label.len()
        )));
    }

    let label_column = label.view().insert_axis(Axis(1));
    Ok(concatenate(Axis(1), &[feature.view(), label_column])?)
}
