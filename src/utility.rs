/// Grouping rows by class and building binary SVM problems
pub mod class_split;
/// Rendering image arrays to files
pub mod implot;
/// Shuffled train/test splitting
pub mod train_test_split;
/// Appending a label column to a feature matrix
pub mod vbind;

pub use class_split::*;
pub use implot::*;
pub use train_test_split::*;
pub use vbind::*;
