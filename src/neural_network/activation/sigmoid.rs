use crate::neural_network::{ActivationFunction, Tensor, map_elements};

/// Threshold for using parallel computation (number of elements)
const SIGMOID_PARALLEL_THRESHOLD: usize = 1000;

/// Sigmoid activation.
///
/// Applies `1 / (1 + e^(-x))` element-wise, squashing values to (0, 1) while preserving
/// the input shape. No input clipping is done: `exp(-x)` saturating to `inf` or `0`
/// still yields 0.0 or 1.0.
///
/// # Examples
///
/// ```rust
/// use kleinml::neural_network::{ActivationFunction, Sigmoid};
/// use ndarray::array;
///
/// let x = array![0.0, 2.0].into_dyn();
/// let y = Sigmoid.evaluate(&x);
/// assert!((y[0] - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sigmoid;

impl Sigmoid {
    /// Creates a new Sigmoid activation.
    ///
    /// # Returns
    ///
    /// - `Self` - A new `Sigmoid` instance
    pub fn new() -> Self {
        Sigmoid
    }
}

impl ActivationFunction for Sigmoid {
    fn evaluate(&self, x: &Tensor) -> Tensor {
        map_elements(x, SIGMOID_PARALLEL_THRESHOLD, |v| 1.0 / (1.0 + (-v).exp()))
    }

    fn gradient(&self, x: &Tensor) -> Tensor {
        // f'(x) = f(x) * (1 - f(x))
        let output = self.evaluate(x);
        map_elements(&output, SIGMOID_PARALLEL_THRESHOLD, |s| s * (1.0 - s))
    }
}
