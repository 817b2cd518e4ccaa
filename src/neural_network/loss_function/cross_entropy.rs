use crate::neural_network::{LossFunction, Tensor, map_elements};

/// Lower bound predictions are clamped to before taking logarithms
const CLIP_MIN: f64 = 1e-15;

/// Upper bound predictions are clamped to before taking logarithms
const CLIP_MAX: f64 = 1.0 - 1e-15;

/// Threshold for using parallel computation (number of elements)
const CROSS_ENTROPY_PARALLEL_THRESHOLD: usize = 4096;

/// Binary Cross Entropy loss function for binary classification
///
/// Predictions are clamped into `[1e-15, 1 - 1e-15]` before both the loss and the gradient,
/// so a prediction of exactly 0 or 1 never produces `ln(0)` or a zero denominator. Values of
/// `y_true` are not validated; anything outside `[0, 1]` just flows through the formula.
///
/// - loss: `-y_true * ln(y_pred) - (1 - y_true) * ln(1 - y_pred)`
/// - gradient: `(y_true - y_pred) / ((y_pred - 1) * y_pred)`
///
/// `y_true` and `y_pred` are combined with ndarray's broadcasting arithmetic, so a `(n, 1)`
/// target can be paired with `(n, k)` predictions.
///
/// # Panics
///
/// - Panics if the shapes of `y_true` and `y_pred` cannot be broadcast together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Creates a new instance of CrossEntropy
    pub fn new() -> Self {
        Self {}
    }
}

fn clip_predictions(y_pred: &Tensor) -> Tensor {
    map_elements(y_pred, CROSS_ENTROPY_PARALLEL_THRESHOLD, |p| {
        p.clamp(CLIP_MIN, CLIP_MAX)
    })
}

impl LossFunction for CrossEntropy {
    fn loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        let clipped = clip_predictions(y_pred);
        let log_p = map_elements(&clipped, CROSS_ENTROPY_PARALLEL_THRESHOLD, f64::ln);
        let log_not_p = map_elements(&clipped, CROSS_ENTROPY_PARALLEL_THRESHOLD, |p| {
            (1.0 - p).ln()
        });

        -(y_true * &log_p) - (1.0 - y_true) * &log_not_p
    }

    fn gradient(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        let clipped = clip_predictions(y_pred);
        let denominator = map_elements(&clipped, CROSS_ENTROPY_PARALLEL_THRESHOLD, |p| {
            (p - 1.0) * p
        });

        (y_true - &clipped) / &denominator
    }
}
