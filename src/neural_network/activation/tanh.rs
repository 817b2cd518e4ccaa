use crate::neural_network::{ActivationFunction, Tensor, map_elements};

/// Threshold for using parallel computation instead of sequential
const TANH_PARALLEL_THRESHOLD: usize = 2048;

/// Tanh (Hyperbolic Tangent) activation.
///
/// Evaluated through the logistic form `2 / (1 + e^(-2x)) - 1`, which maps values to
/// (-1, 1). The gradient is `1 - tanh(x)^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TanH;

impl TanH {
    /// Creates a new TanH activation.
    ///
    /// # Returns
    ///
    /// - `Self` - A new `TanH` instance
    pub fn new() -> Self {
        TanH
    }
}

impl ActivationFunction for TanH {
    fn evaluate(&self, x: &Tensor) -> Tensor {
        map_elements(x, TANH_PARALLEL_THRESHOLD, |v| {
            2.0 / (1.0 + (-2.0 * v).exp()) - 1.0
        })
    }

    fn gradient(&self, x: &Tensor) -> Tensor {
        let output = self.evaluate(x);
        map_elements(&output, TANH_PARALLEL_THRESHOLD, |t| 1.0 - t * t)
    }
}
