#![cfg(feature = "utility")]

use kleinml::ModelError;
use kleinml::utility::*;
use ndarray::{Array1, Array2, array};

#[test]
fn test_split_by_class_keeps_row_order() {
    let feature = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
    let label = array![2, 1, 2, 1];

    let classes = split_by_class(&feature, &label).unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[&2], array![[1.0, 10.0], [3.0, 30.0]]);
    assert_eq!(classes[&1], array![[2.0, 20.0], [4.0, 40.0]]);
}

#[test]
fn test_split_by_class_keeps_first_seen_label_order() {
    let order = [9, 3, 7, 1, 5, 0, 8, 2, 6, 4];
    let label: Array1<i32> = order.iter().chain(order.iter()).copied().collect();
    let feature = Array2::from_shape_fn((label.len(), 1), |(i, _)| i as f64);

    let classes = split_by_class(&feature, &label).unwrap();
    assert_eq!(classes.keys().copied().collect::<Vec<_>>(), order.to_vec());
    assert_eq!(classes[&7], array![[2.0], [12.0]]);
}

#[test]
fn test_split_by_class_string_labels() {
    let feature = array![[0.5], [1.5], [2.5]];
    let label = array!["cat", "dog", "cat"];

    let classes = split_by_class(&feature.view(), &label.view()).unwrap();
    assert_eq!(classes.keys().copied().collect::<Vec<_>>(), vec!["cat", "dog"]);
    assert_eq!(classes["cat"].nrows(), 2);
    assert_eq!(classes["dog"], array![[1.5]]);
}

#[test]
fn test_split_by_class_length_mismatch() {
    let feature = array![[1.0], [2.0]];
    let label = array![0, 1, 2];
    let result = split_by_class(&feature, &label);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_split_by_class_empty() {
    let feature = Array2::<f64>::zeros((0, 3));
    let label = Array1::<i64>::zeros(0);
    assert!(split_by_class(&feature, &label).unwrap().is_empty());
}

#[test]
fn test_binclass_svm_split_defaults() {
    let train_x = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
    let train_y = array![1, 0, 2, 0, 1];
    let test_x = array![[5.0], [6.0], [7.0]];
    let test_y = array![0, 2, 1];

    let (x, y, tx, ty) =
        binclass_svm_split(&train_x, &train_y, &test_x, &test_y, None, None).unwrap();

    assert_eq!(x, array![[1.0], [3.0], [0.0], [4.0]]);
    assert_eq!(y, array![-1.0, -1.0, 1.0, 1.0]);
    assert_eq!(tx, array![[5.0], [7.0]]);
    assert_eq!(ty, array![-1.0, 1.0]);
}

#[test]
fn test_binclass_svm_split_explicit_classes() {
    let train_x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
    let train_y: Array1<i64> = array![3, 1, 3, 2];
    let test_x = array![[9.0, 9.0], [8.0, 8.0]];
    let test_y: Array1<i64> = array![1, 3];

    let (x, y, tx, ty) =
        binclass_svm_split(&train_x, &train_y, &test_x, &test_y, Some(3), Some(1)).unwrap();

    assert_eq!(x, array![[0.0, 0.0], [2.0, 2.0], [1.0, 1.0]]);
    assert_eq!(y, array![-1.0, -1.0, 1.0]);
    assert_eq!(tx, array![[8.0, 8.0], [9.0, 9.0]]);
    assert_eq!(ty, array![-1.0, 1.0]);
}

#[test]
fn test_binclass_svm_split_missing_class() {
    let train_x = array![[0.0], [1.0]];
    let train_y = array![0, 1];
    let test_x = array![[2.0]];
    let test_y = array![0];

    let missing_in_train =
        binclass_svm_split(&train_x, &train_y, &test_x, &test_y, Some(0), Some(7));
    assert!(matches!(missing_in_train, Err(ModelError::MissingClass(_))));

    // class 1 is in the training labels only
    let missing_in_test = binclass_svm_split(&train_x, &train_y, &test_x, &test_y, None, None);
    assert!(matches!(missing_in_test, Err(ModelError::MissingClass(_))));
}

#[test]
fn test_binclass_svm_split_length_mismatch() {
    let train_x = array![[0.0], [1.0]];
    let train_y = array![0, 1];
    let test_x = array![[2.0], [3.0]];
    let test_y = array![0];

    let result = binclass_svm_split(&train_x, &train_y, &test_x, &test_y, None, None);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}
