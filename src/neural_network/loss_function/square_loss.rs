use crate::neural_network::{LossFunction, Tensor};

/// Half squared error loss function
///
/// Computes `0.5 * (y_true - y_pred)^2` per element. The factor one half makes the
/// gradient with respect to the prediction the plain residual `y_pred - y_true`.
///
/// # Example
///
/// ```rust
/// use kleinml::neural_network::loss_function::*;
/// use kleinml::neural_network::LossFunction;
/// use ndarray::ArrayD;
///
/// let square_loss = SquareLoss::new();
///
/// let y_true = ArrayD::from_shape_vec(vec![3, 1], vec![1.0, 2.0, 3.0]).unwrap();
/// let y_pred = ArrayD::from_shape_vec(vec![3, 1], vec![1.5, 2.0, 1.0]).unwrap();
///
/// // Element-wise loss: [0.125, 0.0, 2.0]
/// let loss = square_loss.loss(&y_true, &y_pred);
/// assert_eq!(loss[[2, 0]], 2.0);
///
/// // Gradient: [0.5, 0.0, -2.0]
/// let gradients = square_loss.gradient(&y_true, &y_pred);
/// assert_eq!(gradients[[0, 0]], 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareLoss;

impl SquareLoss {
    /// Creates a new instance of SquareLoss
    ///
    /// # Returns
    ///
    /// - `SquareLoss` - Returns a unit-like struct `SquareLoss`
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for SquareLoss {
    fn loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        let diff = y_true - y_pred;
        diff.mapv(|d| 0.5 * d * d)
    }

    fn gradient(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        y_pred - y_true
    }
}
