use crate::error::LabError;
use image::DynamicImage;

/// Collapse the image to single-channel luminance.
/// Runs first; the binarize step operates on the result.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, LabError> {
    Ok(DynamicImage::ImageLuma8(image.to_luma8()))
}
