use crate::error::LabError;
use image::DynamicImage;

/// Trait that all OCR engines must implement.
///
/// The engine is a black box to the rest of the pipeline: it receives a
/// preprocessed image and returns newline-separated text. Tests substitute
/// a scripted implementation at this seam.
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract")
    fn name(&self) -> &'static str;

    /// Run text recognition on a preprocessed image and return the raw
    /// text exactly as the engine produced it, with no post-cleanup.
    fn recognize(&self, image: &DynamicImage) -> Result<String, LabError>;
}
