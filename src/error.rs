/// Error types that can occur while validating inputs or transforming data
///
/// # Variants
///
/// - `InputValidationError` - indicates the input data provided does not meet the expected format, type, or validation rules
/// - `MissingClass` - indicates that a requested class label was never observed in the label set
/// - `ProcessingError` - indicates that there is something wrong while processing
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InputValidationError(String),
    MissingClass(String),
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::MissingClass(msg) => write!(f, "Missing class: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ndarray::ShapeError> for ModelError {
    fn from(e: ndarray::ShapeError) -> Self {
        ModelError::ProcessingError(e.to_string())
    }
}

/// Input/Output error types that can occur while reading dataset files or writing images
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations (reading, writing, file access)
/// - `CsvError` - Wraps errors raised while parsing delimited text files
/// - `ImageError` - Wraps errors raised while encoding an image
/// - `FormatError` - The file was read but its content does not have the expected layout
/// - `ModelError` - A validation error raised while post-processing loaded data
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    CsvError(csv::Error),
    ImageError(image::ImageError),
    FormatError(String),
    ModelError(ModelError),
}

impl IoError {
    pub fn load_in_buf_reader(
        path: &std::path::Path,
    ) -> Result<std::io::BufReader<std::fs::File>, IoError> {
        let file = std::fs::File::open(path).map_err(IoError::StdIoError)?;
        Ok(std::io::BufReader::new(file))
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::CsvError(e) => write!(f, "CSV error: {}", e),
            IoError::ImageError(e) => write!(f, "Image error: {}", e),
            IoError::FormatError(msg) => write!(f, "Format error: {}", msg),
            IoError::ModelError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIoError(e) => Some(e),
            IoError::CsvError(e) => Some(e),
            IoError::ImageError(e) => Some(e),
            IoError::ModelError(e) => Some(e),
            IoError::FormatError(_) => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::StdIoError(e)
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::CsvError(e)
    }
}

impl From<image::ImageError> for IoError {
    fn from(e: image::ImageError) -> Self {
        IoError::ImageError(e)
    }
}

impl From<ModelError> for IoError {
    fn from(e: ModelError) -> Self {
        IoError::ModelError(e)
    }
}
