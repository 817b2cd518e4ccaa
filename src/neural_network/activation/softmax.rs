use crate::neural_network::{ActivationFunction, Tensor, map_elements};
use ndarray::{ArrayViewMut1, Axis, Zip};

/// Lanes are normalised in parallel above this many lanes
const SOFTMAX_PARALLEL_LANES: usize = 8;

/// Threshold for using parallel computation in the gradient (number of elements)
const SOFTMAX_PARALLEL_THRESHOLD: usize = 4096;

/// Softmax activation.
///
/// Applies softmax along the last axis, converting raw scores (logits) into a probability
/// distribution per lane:
///
/// softmax(x_i) = exp(x_i - max(x)) / sum_j(exp(x_j - max(x)))
///
/// The per-lane maximum is subtracted before exponentiating so large logits do not
/// overflow. A 0-dimensional input is a single lane of length one and evaluates to 1.0.
///
/// # Gradient
///
/// `gradient` returns `s * (1 - s)` element-wise, where `s` is the softmax output. This is
/// the diagonal of the softmax Jacobian only; the cross terms `-s_i * s_j` are not included.
///
/// # Example
///
/// ```rust
/// use kleinml::neural_network::{ActivationFunction, Softmax};
/// use ndarray::array;
///
/// let x = array![[1.0, 2.0, 3.0], [0.0, 0.0, 0.0]].into_dyn();
/// let p = Softmax.evaluate(&x);
///
/// assert!((p.sum() - 2.0).abs() < 1e-12);
/// assert!((p[[1, 0]] - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Softmax;

impl Softmax {
    /// Creates a new Softmax activation.
    ///
    /// # Returns
    ///
    /// - `Self` - A new `Softmax` instance
    pub fn new() -> Self {
        Softmax
    }
}

impl ActivationFunction for Softmax {
    fn evaluate(&self, x: &Tensor) -> Tensor {
        if x.ndim() == 0 {
            return x.mapv(|_| 1.0);
        }

        let axis = Axis(x.ndim() - 1);
        let n_lanes: usize = x.shape()[..axis.index()].iter().product();

        let mut output = x.to_owned();
        let lanes = Zip::from(output.lanes_mut(axis));
        if n_lanes > SOFTMAX_PARALLEL_LANES {
            lanes.par_for_each(normalize_lane);
        } else {
            lanes.for_each(normalize_lane);
        }
        output
    }

    fn gradient(&self, x: &Tensor) -> Tensor {
        let output = self.evaluate(x);
        map_elements(&output, SOFTMAX_PARALLEL_THRESHOLD, |s| s * (1.0 - s))
    }
}

fn normalize_lane(mut lane: ArrayViewMut1<f64>) {
    let max_val = lane.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    lane.mapv_inplace(|v| (v - max_val).exp());
    let sum = lane.sum();
    lane.mapv_inplace(|v| v / sum);
}
