use crate::neural_network::{LossFunction, Tensor};

/// Binary Cross Entropy loss function with clamped predictions
pub mod cross_entropy;
/// Half squared error loss function
pub mod square_loss;

pub use cross_entropy::*;
pub use square_loss::*;

/// Loss function enum, supporting SquareLoss and CrossEntropy
///
/// # Example
///
/// ```rust
/// use kleinml::neural_network::{Loss, LossFunction};
/// use ndarray::array;
///
/// let y_true = array![1.0, 0.0].into_dyn();
/// let y_pred = array![0.5, 0.0].into_dyn();
///
/// let loss = Loss::SquareLoss.loss(&y_true, &y_pred);
/// assert_eq!(loss, array![0.125, 0.0].into_dyn());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    SquareLoss,
    CrossEntropy,
}

impl LossFunction for Loss {
    fn loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        match self {
            Loss::SquareLoss => SquareLoss.loss(y_true, y_pred),
            Loss::CrossEntropy => CrossEntropy.loss(y_true, y_pred),
        }
    }

    fn gradient(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        match self {
            Loss::SquareLoss => SquareLoss.gradient(y_true, y_pred),
            Loss::CrossEntropy => CrossEntropy.gradient(y_true, y_pred),
        }
    }
}
