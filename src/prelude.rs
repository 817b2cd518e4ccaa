pub use crate::error::{IoError, ModelError};

#[cfg(feature = "neural_network")]
pub use crate::neural_network::{
    Activation, ActivationFunction, CrossEntropy, Loss, LossFunction, ReLU, Sigmoid, Softmax,
    SquareLoss, TanH, Tensor,
};

#[cfg(feature = "metric")]
pub use crate::metric::{accuracy, accuracy_score, confusion_matrix, precision, recall};

#[cfg(feature = "utility")]
pub use crate::utility::{
    BinaryDataset, ClassMap, binclass_svm_split, implot, split_by_class, train_test_split, vbind,
};

#[cfg(feature = "dataset")]
pub use crate::dataset::{
    Dataset, DatasetConfig, load_breast_cancer, load_diabetes, load_digits, load_hiragana,
    load_iris, load_mnist, load_rbf,
};
