//! Tesseract engine implementation
//!
//! Statically linked Tesseract via the tesseract-static crate (no system
//! dependencies). Downloads tessdata (training data) automatically on first
//! start unless a tessdata directory is configured.

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::LabError;
use image::DynamicImage;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tesseract_static::tesseract::Tesseract;

/// Page segmentation mode 6: assume a single uniform block of text.
const PAGE_SEG_MODE: &str = "6";

/// Tesseract OCR engine
pub struct TesseractEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    /// Language for OCR
    language: String,
}

impl TesseractEngine {
    /// Create a new Tesseract-based OCR engine.
    ///
    /// Fails with `EngineUnavailable` when the training data cannot be
    /// obtained or the engine cannot be initialized. The server constructs
    /// the engine before binding its listener, so a broken OCR setup
    /// prevents startup instead of failing every request.
    pub fn new(config: &Config) -> Result<Self, LabError> {
        let language = config.language.clone();

        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(&language)?,
        };

        // Probe initialization to validate tessdata before serving requests
        let probe = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            LabError::EngineUnavailable(format!("Tesseract initialization failed: {}", e))
        })?;
        drop(probe);

        tracing::info!(
            "Tesseract engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            language
        );

        Ok(Self {
            tessdata_path,
            language,
        })
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, LabError> {
        // Convert to RGB8 and encode as BMP in memory (BMP is always
        // supported by leptonica)
        let rgb_img = image.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut bmp_data = Vec::new();
        {
            let mut cursor = std::io::Cursor::new(&mut bmp_data);
            rgb_img
                .write_to(&mut cursor, image::ImageFormat::Bmp)
                .map_err(|e| {
                    LabError::ProcessingError(format!("Failed to convert to BMP: {}", e))
                })?;
        }

        tracing::debug!(
            "Recognizing image: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        // A fresh instance per call keeps concurrent requests from sharing
        // engine state.
        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language))
            .map_err(|e| LabError::ProcessingError(format!("Failed to create Tesseract: {}", e)))?;

        tess = tess
            .set_variable("tessedit_pageseg_mode", PAGE_SEG_MODE)
            .map_err(|e| {
                LabError::ProcessingError(format!("Failed to set page segmentation mode: {}", e))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            LabError::ProcessingError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| LabError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| LabError::ProcessingError(format!("Failed to get text: {}", e)))?;

        Ok(text)
    }
}

// ============================================================================
// Tessdata download helpers
// ============================================================================

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, LabError> {
    // Get cache directory for tessdata
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lab-report-server")
        .join("tessdata");

    std::fs::create_dir_all(&cache_dir).map_err(|e| {
        LabError::EngineUnavailable(format!("Failed to create tessdata directory: {}", e))
    })?;

    let traineddata_file = format!("{}.traineddata", language);
    let traineddata_path = cache_dir.join(&traineddata_file);

    // Download if not cached
    if !traineddata_path.exists() {
        let url = tessdata_url(language);
        tracing::info!(
            "Downloading tessdata for '{}' (this may take a moment)...",
            language
        );
        download_file(&url, &traineddata_path)?;
        tracing::info!("Downloaded tessdata to {:?}", traineddata_path);
    } else {
        tracing::info!("Using cached tessdata from {:?}", cache_dir);
    }

    // Return the directory path (Tesseract expects the directory, not the file)
    cache_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| LabError::EngineUnavailable("Invalid tessdata path".to_string()))
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // Use tessdata_fast for smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), LabError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| LabError::EngineUnavailable(format!("Failed to download tessdata: {}", e)))?;

    let mut file = File::create(path).map_err(|e| {
        LabError::EngineUnavailable(format!("Failed to create tessdata file: {}", e))
    })?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        LabError::EngineUnavailable(format!("Failed to read tessdata response: {}", e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        LabError::EngineUnavailable(format!("Failed to write tessdata file: {}", e))
    })?;

    Ok(())
}
