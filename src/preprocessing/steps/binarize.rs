use crate::error::LabError;
use image::{DynamicImage, GrayImage, Luma};

/// Binarization cut-off, the midpoint of the 8-bit range.
const THRESHOLD: u8 = 128;

/// Binarize with a fixed global threshold: pixels below the midpoint
/// become pure black, everything else pure white.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, LabError> {
    let gray = image.to_luma8();
    let binary = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] < THRESHOLD {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    Ok(DynamicImage::ImageLuma8(binary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_strictly_binary() {
        let img = GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();

        for pixel in result.to_luma8().pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "Expected binary pixel, got {}",
                pixel.0[0]
            );
        }
    }

    #[test]
    fn midpoint_splits_black_and_white() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([127]));
        img.put_pixel(1, 0, Luma([128]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        let out = result.to_luma8();

        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn preserves_dimensions() {
        let img = GrayImage::new(33, 21);
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(result.width(), 33);
        assert_eq!(result.height(), 21);
    }
}
