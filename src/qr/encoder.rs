//! Image encoder capability and its PNG implementation.
//!
//! # Design Decisions
//! - The symbol is centred on a white square of the requested size
//! - Modules are whole pixels; leftover space becomes padding
//! - A symbol that cannot fit the requested size is emitted at its
//!   smallest whole-pixel size instead

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use crate::qr::params::RecoveryLevel;

/// Quiet zone width on each side of the symbol, in modules.
const QUIET_ZONE_MODULES: u32 = 4;

/// Error returned when a payload cannot be turned into an image.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The payload does not fit any symbol version at the chosen level.
    #[error("failed to build QR symbol: {0}")]
    Symbol(#[from] QrError),

    /// The rendered raster could not be serialised.
    #[error("failed to write PNG: {0}")]
    Png(#[from] image::ImageError),
}

/// Turns a payload into encoded image bytes.
pub trait ImageEncoder: Send + Sync {
    /// Encode the `payload` bytes at `level` into a `size` x `size` image.
    fn encode(&self, payload: &[u8], level: RecoveryLevel, size: u32) -> Result<Vec<u8>, EncodeError>;
}

/// Encoder producing grayscale PNG images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl PngEncoder {
    /// Create a new PNG encoder.
    pub fn new() -> Self {
        Self
    }

    fn raster(code: &QrCode, size: u32) -> GrayImage {
        let modules = code.width() as u32 + 2 * QUIET_ZONE_MODULES;
        let scale = (size / modules).max(1);
        let side = size.max(modules * scale);

        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(scale, scale)
            .build();

        let mut canvas = GrayImage::from_pixel(side, side, Luma([255u8]));
        let offset = i64::from((side - symbol.width()) / 2);
        image::imageops::overlay(&mut canvas, &symbol, offset, offset);
        canvas
    }
}

impl ImageEncoder for PngEncoder {
    fn encode(&self, payload: &[u8], level: RecoveryLevel, size: u32) -> Result<Vec<u8>, EncodeError> {
        let code = QrCode::with_error_correction_level(payload, ec_level(level))?;
        let raster = Self::raster(&code, size);

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(raster).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}

fn ec_level(level: RecoveryLevel) -> EcLevel {
    match level {
        RecoveryLevel::Low => EcLevel::L,
        RecoveryLevel::Medium => EcLevel::M,
        RecoveryLevel::High => EcLevel::Q,
        RecoveryLevel::Max => EcLevel::H,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(png: &[u8]) -> GrayImage {
        image::load_from_memory_with_format(png, ImageFormat::Png)
            .unwrap()
            .to_luma8()
    }

    #[test]
    fn test_encodes_png_of_requested_size() {
        let png = PngEncoder::new()
            .encode(b"https://example.com", RecoveryLevel::Medium, 256)
            .unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let img = decode(&png);
        assert_eq!(img.dimensions(), (256, 256));
    }

    #[test]
    fn test_corners_are_quiet_and_symbol_is_dark() {
        let img = decode(
            &PngEncoder::new()
                .encode(b"https://example.com", RecoveryLevel::Low, 512)
                .unwrap(),
        );
        assert_eq!(img.get_pixel(0, 0), &Luma([255]));
        assert_eq!(img.get_pixel(511, 511), &Luma([255]));
        assert!(img.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn test_every_level_encodes() {
        for level in [
            RecoveryLevel::Low,
            RecoveryLevel::Medium,
            RecoveryLevel::High,
            RecoveryLevel::Max,
        ] {
            let img = decode(&PngEncoder::new().encode(b"hello", level, 128).unwrap());
            assert_eq!(img.dimensions(), (128, 128));
        }
    }

    #[test]
    fn test_higher_level_needs_larger_symbol() {
        let payload = "x".repeat(200);
        let low = QrCode::with_error_correction_level(payload.as_bytes(), ec_level(RecoveryLevel::Low)).unwrap();
        let max = QrCode::with_error_correction_level(payload.as_bytes(), ec_level(RecoveryLevel::Max)).unwrap();
        assert!(max.width() > low.width());
    }

    #[test]
    fn test_oversized_symbol_is_not_cropped() {
        let payload = "x".repeat(2500);
        let img = decode(&PngEncoder::new().encode(payload.as_bytes(), RecoveryLevel::Low, 128).unwrap());
        assert!(img.width() > 128);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn test_payload_too_long_fails() {
        let payload = "x".repeat(3000);
        let err = PngEncoder::new()
            .encode(payload.as_bytes(), RecoveryLevel::Max, 256)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Symbol(QrError::DataTooLong)));
    }

    #[test]
    fn test_binary_payload_encodes() {
        let img = decode(
            &PngEncoder::new()
                .encode(&[0xFF, 0xFE, 0x00], RecoveryLevel::Medium, 256)
                .unwrap(),
        );
        assert_eq!(img.dimensions(), (256, 256));
    }
}
