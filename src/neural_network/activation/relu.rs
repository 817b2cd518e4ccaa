use crate::neural_network::{ActivationFunction, Tensor, map_elements};

/// Threshold for using parallel computation (number of elements)
const RELU_PARALLEL_THRESHOLD: usize = 10_000;

/// ReLU (Rectified Linear Unit) activation.
///
/// Forward pass keeps `x` where `x >= 0` and writes 0 elsewhere; the gradient is 1 on the
/// same `x >= 0` branch and 0 elsewhere. `x == 0` counts as active in both.
///
/// # Examples
///
/// ```rust
/// use kleinml::neural_network::{ActivationFunction, ReLU};
/// use ndarray::array;
///
/// let x = array![-1.0, 0.0, 3.0].into_dyn();
/// assert_eq!(ReLU.evaluate(&x), array![0.0, 0.0, 3.0].into_dyn());
/// assert_eq!(ReLU.gradient(&x), array![0.0, 1.0, 1.0].into_dyn());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReLU;

impl ReLU {
    /// Creates a new ReLU activation.
    ///
    /// # Returns
    ///
    /// - `Self` - A new `ReLU` instance
    pub fn new() -> Self {
        ReLU
    }
}

impl ActivationFunction for ReLU {
    fn evaluate(&self, x: &Tensor) -> Tensor {
        map_elements(x, RELU_PARALLEL_THRESHOLD, |v| if v >= 0.0 { v } else { 0.0 })
    }

    fn gradient(&self, x: &Tensor) -> Tensor {
        map_elements(x, RELU_PARALLEL_THRESHOLD, |v| if v >= 0.0 { 1.0 } else { 0.0 })
    }
}
