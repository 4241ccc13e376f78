//! Individual preprocessing steps

pub mod binarize;
pub mod grayscale;
