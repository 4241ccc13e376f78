use crate::error::LabError;
use image::DynamicImage;
use std::time::Instant;

use super::steps;

/// Preprocessing pipeline that prepares a report image for OCR.
///
/// The step sequence is fixed: grayscale, then a hard binarize. Both steps
/// preserve the image dimensions.
#[derive(Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Run an image through the preprocessing steps
    pub fn process(&self, image: DynamicImage) -> Result<DynamicImage, LabError> {
        let start = Instant::now();

        let mut img = image;
        img = run_step("grayscale", img, steps::grayscale::apply)?;
        img = run_step("binarize", img, steps::binarize::apply)?;

        tracing::debug!(
            "Preprocessing completed in {}ms",
            start.elapsed().as_millis()
        );

        Ok(img)
    }
}

fn run_step<F>(name: &str, img: DynamicImage, step_fn: F) -> Result<DynamicImage, LabError>
where
    F: FnOnce(DynamicImage) -> Result<DynamicImage, LabError>,
{
    let step_start = Instant::now();
    let result = step_fn(img)?;
    tracing::debug!("Step {} took {}ms", name, step_start.elapsed().as_millis());
    Ok(result)
}
