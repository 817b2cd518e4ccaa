use crate::neural_network::Tensor;

/// Defines the interface for loss functions used in neural network training.
///
/// Both methods work element-wise: the returned tensor has the same shape as the inputs,
/// so callers decide how to reduce it (sum, mean, per-sample) for reporting.
pub trait LossFunction {
    /// Computes the element-wise loss between true and predicted values.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Tensor containing the ground truth values
    /// - `y_pred` - Tensor containing the predicted values
    ///
    /// # Returns
    ///
    /// * `Tensor` - The loss of every element, same shape as the inputs
    fn loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor;

    /// Computes the gradient of the loss with respect to the predictions.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Tensor containing the ground truth values
    /// - `y_pred` - Tensor containing the predicted values
    ///
    /// # Returns
    ///
    /// * `Tensor` - Element-wise derivative of the loss with respect to `y_pred`
    fn gradient(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor;

    /// Averages the element-wise loss into a single scalar.
    ///
    /// # Returns
    ///
    /// * `f64` - Mean of [`LossFunction::loss`] (0.0 for empty inputs)
    fn mean_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> f64 {
        self.loss(y_true, y_pred).mean().unwrap_or(0.0)
    }
}

/// Defines the interface for activation functions.
///
/// `gradient` is the derivative of `evaluate` with respect to the same input `x`,
/// not with respect to an already activated output.
pub trait ActivationFunction {
    /// Applies the activation function to the input tensor.
    ///
    /// # Parameters
    ///
    /// - `x` - Pre-activation values
    ///
    /// # Returns
    ///
    /// * `Tensor` - A new tensor with the activation applied, same shape as `x`
    fn evaluate(&self, x: &Tensor) -> Tensor;

    /// Computes the derivative of the activation function at `x`.
    ///
    /// # Parameters
    ///
    /// - `x` - Pre-activation values
    ///
    /// # Returns
    ///
    /// * `Tensor` - Element-wise derivative, same shape as `x`
    fn gradient(&self, x: &Tensor) -> Tensor;
}
