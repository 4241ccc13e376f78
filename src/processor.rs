use std::sync::Arc;

use image::DynamicImage;

use crate::engine::OcrEngine;
use crate::error::LabError;
use crate::parser::{self, TestRecord};
use crate::preprocessing::Pipeline;

/// Runs the full extraction pipeline for one uploaded image: decode,
/// preprocess, recognize, parse.
///
/// Stateless per call; only the OCR engine is shared across requests.
pub struct ReportProcessor {
    engine: Arc<dyn OcrEngine>,
    pipeline: Pipeline,
}

impl ReportProcessor {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            engine,
            pipeline: Pipeline::new(),
        }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Extract lab tests from raw image bytes.
    pub fn process(&self, image_bytes: &[u8]) -> Result<Vec<TestRecord>, LabError> {
        let image = decode_image(image_bytes)?;
        let prepared = self.pipeline.process(image)?;
        let text = self.engine.recognize(&prepared)?;

        tracing::debug!("Extracted text:\n{}", text);

        Ok(parser::extract_lab_tests(&text))
    }
}

fn decode_image(bytes: &[u8]) -> Result<DynamicImage, LabError> {
    image::load_from_memory(bytes).map_err(|e| LabError::DecodeError(e.to_string()))
}
