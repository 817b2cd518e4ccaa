/// Module that contains activation function implementations
pub mod activation;
/// Module that contains loss function implementations
pub mod loss_function;

pub use activation::*;
pub use loss_function::*;

use ndarray::ArrayD;

/// Type alias for n-dimensional arrays used as tensors by losses and activations
pub type Tensor = ArrayD<f64>;

pub use crate::traits::ActivationFunction;
pub use crate::traits::LossFunction;

/// Applies `f` to every element of `x`, switching to rayon once the tensor holds
/// at least `parallel_threshold` elements.
fn map_elements<F>(x: &Tensor, parallel_threshold: usize, f: F) -> Tensor
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    let mut output = x.to_owned();
    if output.len() >= parallel_threshold {
        output.par_mapv_inplace(f);
    } else {
        output.mapv_inplace(f);
    }
    output
}
