use crate::neural_network::{ActivationFunction, Tensor};

/// ReLU (Rectified Linear Unit) activation
pub mod relu;
/// Sigmoid (logistic) activation
pub mod sigmoid;
/// Softmax activation along the last axis
pub mod softmax;
/// Hyperbolic tangent activation
pub mod tanh;

pub use relu::*;
pub use sigmoid::*;
pub use softmax::*;
pub use tanh::*;

/// Activation function enum, supporting Sigmoid, Softmax, ReLU and TanH
///
/// Dispatches to the matching unit struct, so code that picks an activation at
/// runtime (for example from a layer description) can hold a single value type.
///
/// # Example
///
/// ```rust
/// use kleinml::neural_network::{Activation, ActivationFunction};
/// use ndarray::array;
///
/// let x = array![-1.0, 0.0, 3.0].into_dyn();
/// let y = Activation::ReLU.evaluate(&x);
/// assert_eq!(y, array![0.0, 0.0, 3.0].into_dyn());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Softmax,
    ReLU,
    TanH,
}

impl ActivationFunction for Activation {
    fn evaluate(&self, x: &Tensor) -> Tensor {
        match self {
            Activation::Sigmoid => Sigmoid.evaluate(x),
            Activation::Softmax => Softmax.evaluate(x),
            Activation::ReLU => ReLU.evaluate(x),
            Activation::TanH => TanH.evaluate(x),
        }
    }

    fn gradient(&self, x: &Tensor) -> Tensor {
        match self {
            Activation::Sigmoid => Sigmoid.gradient(x),
            Activation::Softmax => Softmax.gradient(x),
            Activation::ReLU => ReLU.gradient(x),
            Activation::TanH => TanH.gradient(x),
        }
    }
}
