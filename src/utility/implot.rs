use crate::error::{IoError, ModelError};
use image::GrayImage;
use log::debug;
use ndarray::{Array2, ArrayBase, Data, Dimension, Ix2};
use std::path::Path;

/// Converts a 2D (or reshaped) array into an 8-bit grayscale image.
///
/// Values are min-max scaled so the smallest element maps to 0 and the largest to 255, the same
/// auto-scaling an `imshow` call applies. A constant image maps to all zeros.
///
/// # Parameters
///
/// - `img` - Pixel values of any dimensionality
/// - `dim` - Optional `(rows, cols)` to reshape `img` into (row-major). When `None`, `img` must already be 2D
///
/// # Returns
///
/// - `Result<GrayImage, ModelError>` - Image of width `cols` and height `rows`
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If `dim` does not match the element count, or `img` is not 2D and no `dim` is given
pub fn to_grayscale<S, D>(
    img: &ArrayBase<S, D>,
    dim: Option<(usize, usize)>,
) -> Result<GrayImage, ModelError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let pixels: Array2<f64> = match dim {
        Some((rows, cols)) => {
            Array2::from_shape_vec((rows, cols), img.iter().cloned().collect()).map_err(|e| {
                ModelError::InputValidationError(format!(
                    "Cannot reshape {} elements into ({}, {}): {}",
                    img.len(),
                    rows,
                    cols,
                    e
                ))
            })?
        }
        None => img
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| {
                ModelError::InputValidationError(format!(
                    "Image must be 2D when no dimension is given, got shape {:?}",
                    img.shape()
                ))
            })?
            .to_owned(),
    };

    let min = pixels.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = pixels.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    // Row-major iteration matches the image buffer layout
    let buffer: Vec<u8> = pixels
        .iter()
        .map(|&v| {
            if range > 0.0 {
                ((v - min) / range * 255.0).round() as u8
            } else {
                0
            }
        })
        .collect();

    let (rows, cols) = pixels.dim();
    GrayImage::from_raw(cols as u32, rows as u32, buffer).ok_or_else(|| {
        ModelError::ProcessingError(format!("Image buffer does not fit {}x{} pixels", cols, rows))
    })
}

/// Renders an image array to a PNG file.
///
/// # Parameters
///
/// - `img` - Pixel values of any dimensionality
/// - `dim` - Optional `(rows, cols)` to reshape `img` into
/// - `path` - Output file; the format follows the extension (`.png`)
///
/// # Errors
///
/// - `IoError::ModelError` - If the array cannot be shaped into an image
/// - `IoError::ImageError` - If encoding or writing the file fails
///
/// # Example
/// ```rust,no_run
/// use ndarray::Array1;
/// use kleinml::utility::implot::implot;
///
/// let digit = Array1::<f64>::linspace(0.0, 1.0, 64);
/// implot(&digit, Some((8, 8)), "digit.png").unwrap();
/// ```
pub fn implot<S, D, P>(img: &ArrayBase<S, D>, dim: Option<(usize, usize)>, path: P) -> Result<(), IoError>
where
    S: Data<Elem = f64>,
    D: Dimension,
    P: AsRef<Path>,
{
    let image = to_grayscale(img, dim)?;
    debug!(
        "Writing {}x{} image to {}",
        image.width(),
        image.height(),
        path.as_ref().display()
    );
    image.save(path.as_ref())?;
    Ok(())
}
