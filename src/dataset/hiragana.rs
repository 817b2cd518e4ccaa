use super::{Dataset, DatasetConfig, open, to_matrix};
use crate::error::IoError;
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use ndarray::Array1;
use std::io::Read;

/// File name of the raw hiragana images inside the dataset directory
pub const HIRAGANA_X_FILE: &str = "hiragana_x.dat";

/// File name of the raw hiragana labels inside the dataset directory
pub const HIRAGANA_Y_FILE: &str = "hiragana_y.dat";

/// Side length of a hiragana character image
pub const HIRAGANA_SIDE: usize = 32;

/// Loads the hiragana character dataset and splits it into training and test sets
///
/// `hiragana_x.dat` is a raw dump of little-endian `f32` pixels, 32x32 per character, and
/// `hiragana_y.dat` a raw dump of little-endian `i64` labels, one per character. The number of
/// labels decides the number of samples.
///
/// # Parameters
///
/// - `config` - Dataset directory and split settings
///
/// # Returns
///
/// - `Result<Dataset<i64>, IoError>` - `(train_x, train_y, test_x, test_y)` with 1024 pixel columns
///
/// # Errors
///
/// - `IoError::StdIoError` - If either file cannot be read
/// - `IoError::FormatError` - If a file size is not a multiple of its element size, or the pixel count does not match the label count
pub fn load_hiragana(config: &DatasetConfig) -> Result<Dataset<i64>, IoError> {
    let pixel_bytes = read_all(config, HIRAGANA_X_FILE, 4)?;
    let label_bytes = read_all(config, HIRAGANA_Y_FILE, 8)?;

    let mut pixels = vec![0f32; pixel_bytes.len() / 4];
    LittleEndian::read_f32_into(&pixel_bytes, &mut pixels);
    let mut labels = vec![0i64; label_bytes.len() / 8];
    LittleEndian::read_i64_into(&label_bytes, &mut labels);

    let n_features = HIRAGANA_SIDE * HIRAGANA_SIDE;
    if pixels.len() != labels.len() * n_features {
        return Err(IoError::FormatError(format!(
            "{} pixels cannot be split into {} images of {}x{}",
            pixels.len(),
            labels.len(),
            HIRAGANA_SIDE,
            HIRAGANA_SIDE
        )));
    }

    let x = to_matrix(
        pixels.into_iter().map(f64::from).collect(),
        labels.len(),
        n_features,
    )?;
    debug!("Loaded hiragana: {} samples", x.nrows());
    config.split(x, Array1::from_vec(labels))
}

fn read_all(config: &DatasetConfig, name: &str, item_size: usize) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    open(&config.file(name))?.read_to_end(&mut bytes)?;
    if bytes.len() % item_size != 0 {
        return Err(IoError::FormatError(format!(
            "{} holds {} bytes, not a multiple of {}",
            name,
            bytes.len(),
            item_size
        )));
    }
    Ok(bytes)
}
