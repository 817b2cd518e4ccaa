#![cfg(feature = "metric")]

use approx::assert_abs_diff_eq;
use kleinml::metric::*;
use ndarray::{Array1, array};

#[test]
fn test_confusion_matrix() {
    let true_y = array![0usize, 1, 1, 0];
    let pred_y = array![0usize, 1, 0, 0];
    let cm = confusion_matrix(&true_y, &pred_y, None);
    assert_eq!(cm, array![[2usize, 0], [1, 1]]);
}

#[test]
fn test_confusion_matrix_explicit_class_count() {
    let true_y = array![0usize, 2, 1];
    let pred_y = array![0usize, 2, 2];
    let cm = confusion_matrix(&true_y, &pred_y, Some(4));
    assert_eq!(cm.dim(), (4, 4));
    assert_eq!(cm.sum(), 3usize);
    assert_eq!(cm[[1, 2]], 1usize);
    assert_eq!(cm[[2, 2]], 1usize);
}

#[test]
fn test_confusion_matrix_on_views() {
    let true_y = array![0usize, 1, 2, 2, 1];
    let pred_y = array![0usize, 2, 2, 1, 1];
    let cm = confusion_matrix(&true_y.view(), &pred_y.view(), None);
    assert_eq!(cm, array![[1usize, 0, 0], [0, 1, 1], [0, 1, 1]]);
}

#[test]
fn test_confusion_matrix_signed_labels() {
    // loaders return i64 labels
    let true_y: Array1<i64> = array![0, 1, 2, 2, 1];
    let pred_y: Array1<i64> = array![0, 2, 2, 1, 1];
    let cm = confusion_matrix(&true_y, &pred_y, None);
    assert_eq!(cm, array![[1usize, 0, 0], [0, 1, 1], [0, 1, 1]]);

    let as_usize = confusion_matrix(&true_y.mapv(|v| v as usize), &pred_y.mapv(|v| v as usize), None);
    assert_eq!(cm, as_usize);
}

#[test]
#[should_panic]
fn test_confusion_matrix_negative_label() {
    confusion_matrix(&array![0i64, -1], &array![0i64, 1], Some(2));
}

#[test]
#[should_panic]
fn test_confusion_matrix_length_mismatch() {
    confusion_matrix(&array![0usize, 1], &array![0usize], None);
}

#[test]
fn test_precision_recall_accuracy() {
    let cm = array![[2usize, 0], [1, 1]];

    assert_eq!(accuracy(&cm), 0.75);
    assert_eq!(precision(1, &cm), 1.0);
    assert_eq!(recall(1, &cm), 0.5);
    assert_abs_diff_eq!(precision(0, &cm), 2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(recall(0, &cm), 1.0);
}

#[test]
fn test_precision_of_unpredicted_class_is_nan() {
    let cm = array![[1usize, 0], [1, 0]];
    assert!(precision(1, &cm).is_nan());
    assert_eq!(recall(1, &cm), 0.0);
}

#[test]
fn test_accuracy_of_empty_matrix_is_nan() {
    let cm = ndarray::Array2::<usize>::zeros((2, 2));
    assert!(accuracy(&cm).is_nan());
}

#[test]
fn test_accuracy_score() {
    assert_eq!(accuracy_score(&array![1, 2, 3, 4], &array![1, 2, 0, 4]), 0.75);
    assert_eq!(accuracy_score(&array!["a", "b"], &array!["a", "b"]), 1.0);
    assert_eq!(accuracy_score(&array![1.0, 2.0], &array![0.0, 0.0]), 0.0);
}

#[test]
fn test_accuracy_score_agrees_with_confusion_matrix() {
    let true_y: Array1<usize> = array![0, 1, 2, 2, 1, 0, 0, 2];
    let pred_y: Array1<usize> = array![0, 2, 2, 2, 1, 1, 0, 0];
    let cm = confusion_matrix(&true_y, &pred_y, None);
    assert_abs_diff_eq!(accuracy(&cm), accuracy_score(&true_y, &pred_y), epsilon = 1e-12);
}

#[test]
#[should_panic]
fn test_accuracy_score_length_mismatch() {
    accuracy_score(&array![1, 2, 3], &array![1, 2]);
}
