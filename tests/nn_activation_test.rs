#![cfg(feature = "neural_network")]

use approx::assert_abs_diff_eq;
use kleinml::neural_network::*;
use ndarray::{Array, ArrayD, IxDyn, array};

fn numeric_derivative<A: ActivationFunction>(activation: &A, x: &Tensor) -> Tensor {
    let h = 1e-6;
    let plus = activation.evaluate(&x.mapv(|v| v + h));
    let minus = activation.evaluate(&x.mapv(|v| v - h));
    (plus - minus) / (2.0 * h)
}

#[test]
fn test_relu() {
    let x = array![-1.0, 0.0, 3.0].into_dyn();
    assert_eq!(ReLU.evaluate(&x), array![0.0, 0.0, 3.0].into_dyn());
    assert_eq!(ReLU.gradient(&x), array![0.0, 1.0, 1.0].into_dyn());
}

#[test]
fn test_relu_keeps_shape() {
    let x = Array::from_shape_fn(IxDyn(&[2, 3, 4]), |idx| idx[2] as f64 - 1.5);
    let y = ReLU::new().evaluate(&x);
    assert_eq!(y.shape(), &[2, 3, 4]);
    assert!(y.iter().all(|&v| v >= 0.0));
}

#[test]
fn test_sigmoid_values() {
    let x = array![0.0, 1.0, -1.0].into_dyn();
    let y = Sigmoid.evaluate(&x);
    assert_abs_diff_eq!(y[0], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(y[1], 0.7310585786300049, epsilon = 1e-12);
    assert_abs_diff_eq!(y[1] + y[2], 1.0, epsilon = 1e-12);

    let g = Sigmoid.gradient(&array![0.0].into_dyn());
    assert_abs_diff_eq!(g[0], 0.25, epsilon = 1e-12);
}

#[test]
fn test_sigmoid_saturates() {
    let y = Sigmoid.evaluate(&array![-1000.0, 1000.0].into_dyn());
    assert_eq!(y[0], 0.0);
    assert_eq!(y[1], 1.0);
}

#[test]
fn test_sigmoid_gradient_matches_finite_difference() {
    let x = array![[-2.0, -0.5, 0.0], [0.3, 1.0, 4.0]].into_dyn();
    let analytic = Sigmoid.gradient(&x);
    let numeric = numeric_derivative(&Sigmoid, &x);
    for (a, n) in analytic.iter().zip(numeric.iter()) {
        assert_abs_diff_eq!(a, n, epsilon = 1e-6);
    }
}

#[test]
fn test_sigmoid_large_tensor() {
    // above the parallel threshold
    let x = Array::linspace(-6.0, 6.0, 5000).into_dyn();
    let y = Sigmoid.evaluate(&x);
    for (&v, &s) in x.iter().zip(y.iter()) {
        assert_abs_diff_eq!(s, 1.0 / (1.0 + (-v).exp()), epsilon = 1e-12);
    }
}

#[test]
fn test_tanh_matches_std() {
    let x = Array::linspace(-5.0, 5.0, 41).into_dyn();
    let y = TanH.evaluate(&x);
    let g = TanH.gradient(&x);
    for ((&v, &t), &d) in x.iter().zip(y.iter()).zip(g.iter()) {
        assert_abs_diff_eq!(t, v.tanh(), epsilon = 1e-12);
        assert_abs_diff_eq!(d, 1.0 - v.tanh().powi(2), epsilon = 1e-12);
    }
}

#[test]
fn test_tanh_gradient_matches_finite_difference() {
    let x = array![-1.5, -0.2, 0.0, 0.7, 2.0].into_dyn();
    let analytic = TanH.gradient(&x);
    let numeric = numeric_derivative(&TanH, &x);
    for (a, n) in analytic.iter().zip(numeric.iter()) {
        assert_abs_diff_eq!(a, n, epsilon = 1e-6);
    }
}

#[test]
fn test_softmax_rows_sum_to_one() {
    let x = array![[1.0, 2.0, 3.0], [-1.0, 0.0, 5.0]].into_dyn();
    let p = Softmax.evaluate(&x);
    assert_eq!(p.shape(), &[2, 3]);
    for row in p.outer_iter() {
        assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
    }
    assert!(p.iter().all(|&v| v > 0.0 && v < 1.0));
    assert_abs_diff_eq!(p[[0, 2]], 0.6652409557748219, epsilon = 1e-12);
}

#[test]
fn test_softmax_shift_invariant() {
    let x = array![0.5, -1.0, 2.0, 0.0].into_dyn();
    let shifted = x.mapv(|v| v + 100.0);
    let p = Softmax.evaluate(&x);
    let q = Softmax.evaluate(&shifted);
    for (a, b) in p.iter().zip(q.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
}

#[test]
fn test_softmax_large_logits() {
    let p = Softmax.evaluate(&array![1000.0, 1000.0].into_dyn());
    assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(p[1], 0.5, epsilon = 1e-12);
}

#[test]
fn test_softmax_last_axis_of_3d() {
    let x = Array::from_shape_fn(IxDyn(&[2, 3, 4]), |idx| (idx[0] + 2 * idx[1] + idx[2]) as f64);
    let p = Softmax.evaluate(&x);
    for i in 0..2 {
        for j in 0..3 {
            let lane_sum: f64 = (0..4).map(|k| p[[i, j, k]]).sum();
            assert_abs_diff_eq!(lane_sum, 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_softmax_scalar() {
    let x = ArrayD::from_elem(IxDyn(&[]), 3.5);
    let p = Softmax.evaluate(&x);
    assert_eq!(p.ndim(), 0);
    assert_eq!(p.sum(), 1.0);
}

#[test]
fn test_softmax_gradient_is_diagonal() {
    let x = array![[1.0, 2.0, 3.0]].into_dyn();
    let p = Softmax.evaluate(&x);
    let g = Softmax.gradient(&x);
    for (&s, &d) in p.iter().zip(g.iter()) {
        assert_abs_diff_eq!(d, s * (1.0 - s), epsilon = 1e-12);
    }
}

#[test]
fn test_softmax_large_tensor() {
    let x = Array::from_shape_fn(IxDyn(&[100, 50]), |idx| ((idx[0] * 7 + idx[1]) % 13) as f64);
    let p = Softmax.evaluate(&x);
    for row in p.outer_iter() {
        assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_activation_enum_delegates() {
    let x = array![[-2.0, 0.0, 1.5]].into_dyn();
    assert_eq!(Activation::ReLU.evaluate(&x), ReLU.evaluate(&x));
    assert_eq!(Activation::Sigmoid.evaluate(&x), Sigmoid.evaluate(&x));
    assert_eq!(Activation::Softmax.evaluate(&x), Softmax.evaluate(&x));
    assert_eq!(Activation::TanH.evaluate(&x), TanH.evaluate(&x));
    assert_eq!(Activation::TanH.gradient(&x), TanH.gradient(&x));
    assert_eq!(Activation::Sigmoid.gradient(&x), Sigmoid.gradient(&x));
}
