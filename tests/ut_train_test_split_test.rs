#![cfg(feature = "utility")]

use kleinml::ModelError;
use kleinml::utility::train_test_split;
use ndarray::{Array1, Array2};

fn indexed_data(n: usize) -> (Array2<f64>, Array1<usize>) {
    let x = Array2::from_shape_fn((n, 2), |(i, j)| (i * 10 + j) as f64);
    let y = Array1::from_iter(0..n);
    (x, y)
}

#[test]
fn test_split_sizes() {
    let (x, y) = indexed_data(10);
    let (x_train, x_test, y_train, y_test) =
        train_test_split(x, y, Some(0.2), Some(42)).unwrap();

    assert_eq!(x_train.nrows(), 8);
    assert_eq!(x_test.nrows(), 2);
    assert_eq!(y_train.len(), 8);
    assert_eq!(y_test.len(), 2);
}

#[test]
fn test_split_default_test_size() {
    let (x, y) = indexed_data(10);
    let (_, x_test, _, _) = train_test_split(x, y, None, Some(1)).unwrap();
    assert_eq!(x_test.nrows(), 3);
}

#[test]
fn test_split_rounds_test_count_up() {
    let (x, y) = indexed_data(442);
    let (x_train, x_test, _, _) = train_test_split(x, y, Some(0.2), Some(0)).unwrap();
    assert_eq!(x_test.nrows(), 89);
    assert_eq!(x_train.nrows(), 353);

    let (x, y) = indexed_data(7);
    let (_, x_test, _, y_test) = train_test_split(x, y, Some(0.2), Some(0)).unwrap();
    assert_eq!(x_test.nrows(), 2);
    assert_eq!(y_test.len(), 2);
}

#[test]
fn test_split_keeps_at_least_one_training_sample() {
    let (x, y) = indexed_data(3);
    let (x_train, x_test, _, _) = train_test_split(x, y, Some(0.9), Some(5)).unwrap();
    assert_eq!(x_train.nrows(), 1);
    assert_eq!(x_test.nrows(), 2);
}

#[test]
fn test_split_keeps_rows_with_labels() {
    let (x, y) = indexed_data(20);
    let (x_train, x_test, y_train, y_test) =
        train_test_split(x, y, Some(0.25), Some(7)).unwrap();

    for (row, &label) in x_train.outer_iter().zip(y_train.iter()) {
        assert_eq!(row[0], (label * 10) as f64);
    }
    for (row, &label) in x_test.outer_iter().zip(y_test.iter()) {
        assert_eq!(row[0], (label * 10) as f64);
    }

    let mut all: Vec<usize> = y_train.iter().chain(y_test.iter()).cloned().collect();
    all.sort_unstable();
    assert_eq!(all, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_split_is_reproducible_with_seed() {
    let (x, y) = indexed_data(30);
    let first = train_test_split(x.clone(), y.clone(), Some(0.3), Some(123)).unwrap();
    let second = train_test_split(x, y, Some(0.3), Some(123)).unwrap();
    assert_eq!(first.2, second.2);
    assert_eq!(first.3, second.3);
}

#[test]
fn test_split_two_samples() {
    let (x, y) = indexed_data(2);
    let (x_train, x_test, _, _) = train_test_split(x, y, Some(0.1), None).unwrap();
    assert_eq!(x_train.nrows(), 1);
    assert_eq!(x_test.nrows(), 1);
}

#[test]
fn test_split_errors() {
    let (x, y) = indexed_data(0);
    assert!(matches!(
        train_test_split(x, y, None, None),
        Err(ModelError::InputValidationError(_))
    ));

    let (x, y) = indexed_data(1);
    assert!(matches!(
        train_test_split(x, y, None, None),
        Err(ModelError::InputValidationError(_))
    ));

    let (x, _) = indexed_data(5);
    let y = Array1::from_iter(0..4usize);
    assert!(matches!(
        train_test_split(x, y, None, None),
        Err(ModelError::InputValidationError(_))
    ));

    let (x, y) = indexed_data(5);
    assert!(matches!(
        train_test_split(x, y, Some(1.0), None),
        Err(ModelError::InputValidationError(_))
    ));

    let (x, y) = indexed_data(5);
    assert!(matches!(
        train_test_split(x, y, Some(f64::NAN), None),
        Err(ModelError::InputValidationError(_))
    ));
}
