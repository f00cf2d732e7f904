//! Codecs for mock image output.
//!
//! This module provides JPEG and PNG encoding using the `image` crate's
//! encoders, behind the `Encoder` trait so the generator can be driven by
//! any platform encoder (or a synthetic one in tests).

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

use crate::render::RasterSurface;

/// Errors that can occur while encoding a surface.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec could not produce bytes
    #[error("{codec} encoding failed: {message}")]
    EncodingFailed { codec: Codec, message: String },
}

/// Output codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Lossy; quality-tunable.
    #[default]
    Jpeg,
    /// Lossless; quality is ignored.
    Png,
}

impl Codec {
    /// Whether encoded size depends on a quality parameter.
    pub fn is_lossy(self) -> bool {
        matches!(self, Codec::Jpeg)
    }

    /// File extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            Codec::Jpeg => "jpg",
            Codec::Png => "png",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Codec::Jpeg => "image/jpeg",
            Codec::Png => "image/png",
        }
    }

    /// Parse a codec from a mime type or extension (`image/png`, `jpg`, ...).
    pub fn parse(input: &str) -> Option<Codec> {
        match input.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "image/jpeg" | "image/jpg" => Some(Codec::Jpeg),
            "png" | "image/png" => Some(Codec::Png),
            _ => None,
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Codec::Jpeg => "JPEG",
            Codec::Png => "PNG",
        })
    }
}

/// An encoded image blob with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub codec: Codec,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(codec: Codec, bytes: Vec<u8>) -> Self {
        Self { codec, bytes }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime(&self) -> &'static str {
        self.codec.mime()
    }
}

/// Turns a painted surface into encoded bytes.
pub trait Encoder {
    /// Encode `surface` with `codec`.
    ///
    /// `quality` is in 0.0..=1.0 and only meaningful for lossy codecs.
    fn encode(
        &self,
        surface: &dyn RasterSurface,
        codec: Codec,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError>;
}

/// Encoder backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateEncoder;

impl Encoder for ImageCrateEncoder {
    fn encode(
        &self,
        surface: &dyn RasterSurface,
        codec: Codec,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError> {
        let (pixels, width, height) = (surface.rgb_pixels(), surface.width(), surface.height());
        let bytes = match codec {
            Codec::Jpeg => encode_jpeg(pixels, width, height, jpeg_quality(quality))?,
            Codec::Png => encode_png(pixels, width, height)?,
        };
        Ok(EncodedImage::new(codec, bytes))
    }
}

/// Map a normalized quality (0.0-1.0) to the JPEG encoder's 1-100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 100;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Encode RGB pixel data to PNG bytes.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::Png,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
