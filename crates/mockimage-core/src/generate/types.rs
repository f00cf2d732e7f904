//! Core types for the generate pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::preview::PreviewError;
use crate::encode::{Codec, EncodeError, EncodedImage};

/// Error types for a generation attempt.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Width or height is zero.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A side or the total area exceeds the configured maximum.
    #[error("Dimensions too large: {width}x{height} (max {max_dimension} per side, {max_area} pixels)")]
    DimensionsTooLarge {
        width: u32,
        height: u32,
        max_dimension: u32,
        max_area: u64,
    },

    /// Target size is not a positive number within the configured range.
    #[error("Invalid target size: {target_kb} KB")]
    InvalidTargetSize { target_kb: f64 },

    /// Another generation is in flight.
    #[error("A generation is already in progress")]
    Busy,

    /// The codec could not produce bytes.
    #[error(transparent)]
    Encoding(#[from] EncodeError),

    /// The preview handle for a new result could not be created.
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

/// Pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Rendering,
    Encoding,
    Searching,
    Padding,
    Done,
    /// Validation failed; nothing was rendered.
    Rejected,
    /// Encoding or preview creation failed; the previous result stands.
    Failed,
}

/// How to encode a rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub codec: Codec,
    /// Byte budget in KB (1 KB = 1024 bytes); may be fractional
    pub target_kb: f64,
    /// Starting quality for lossy codecs (0.0-1.0)
    pub quality: f32,
}

impl EncodeRequest {
    pub fn new(codec: Codec, target_kb: f64) -> Self {
        Self {
            codec,
            target_kb,
            quality: 0.9,
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality.clamp(0.0, 1.0);
        self
    }

    /// Set the starting quality from a 1-100 percentage.
    pub fn with_quality_percent(self, percent: u8) -> Self {
        self.with_quality(percent.clamp(1, 100) as f32 / 100.0)
    }

    /// Byte budget: `floor(target_kb * 1024)`.
    pub fn target_bytes(&self) -> u64 {
        if !self.target_kb.is_finite() || self.target_kb <= 0.0 {
            return 0;
        }
        (self.target_kb * 1024.0).floor() as u64
    }
}

/// Outcome of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeResult {
    /// Final blob, padding included.
    pub image: EncodedImage,
    pub width: u32,
    pub height: u32,
    pub target_bytes: u64,
    /// Size of the first encode at the starting quality.
    pub initial_size: u64,
    /// Size handed to the padding stage.
    pub base_size: u64,
    pub padding_bytes: u64,
    pub quality_used: f32,
    /// Within the hit tolerance of the target and not over it.
    pub hits_target: bool,
    /// Even the floor quality exceeded the target.
    pub is_too_large: bool,
}

impl EncodeResult {
    pub fn final_size(&self) -> u64 {
        self.image.len() as u64
    }

    pub fn codec(&self) -> Codec {
        self.image.codec
    }

    pub fn extension(&self) -> &'static str {
        self.image.codec.extension()
    }

    pub fn mime(&self) -> &'static str {
        self.image.codec.mime()
    }

    /// `{width}x{height}.{ext}`
    pub fn file_name(&self) -> String {
        format!("{}x{}.{}", self.width, self.height, self.extension())
    }

    /// File name offered by the download link.
    pub fn download_name(&self) -> String {
        format!("devhero-{}", self.file_name())
    }

    /// Everything but the bytes, for display.
    pub fn stats(&self) -> EncodeStats {
        EncodeStats {
            final_size: self.final_size(),
            base_size: self.base_size,
            initial_size: self.initial_size,
            target_bytes: self.target_bytes,
            padded_bytes: self.padding_bytes,
            quality_used: self.quality_used,
            format: self.mime().to_string(),
            width: self.width,
            height: self.height,
            ext: self.extension().to_string(),
            file_name: self.download_name(),
            hits_target: self.hits_target,
            is_too_large: self.is_too_large,
        }
    }
}

/// Serializable summary of an `EncodeResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeStats {
    pub final_size: u64,
    pub base_size: u64,
    pub initial_size: u64,
    pub target_bytes: u64,
    pub padded_bytes: u64,
    pub quality_used: f32,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub ext: String,
    pub file_name: String,
    pub hits_target: bool,
    pub is_too_large: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(codec: Codec) -> EncodeResult {
        EncodeResult {
            image: EncodedImage::new(codec, vec![0; 120]),
            width: 1200,
            height: 630,
            target_bytes: 120,
            initial_size: 200,
            base_size: 100,
            padding_bytes: 20,
            quality_used: 0.5,
            hits_target: true,
            is_too_large: false,
        }
    }

    #[test]
    fn test_target_bytes_floors() {
        assert_eq!(EncodeRequest::new(Codec::Jpeg, 50.0).target_bytes(), 51_200);
        assert_eq!(EncodeRequest::new(Codec::Jpeg, 0.5).target_bytes(), 512);
        assert_eq!(EncodeRequest::new(Codec::Jpeg, 0.0009).target_bytes(), 0);
    }

    #[test]
    fn test_target_bytes_invalid_is_zero() {
        assert_eq!(EncodeRequest::new(Codec::Png, -1.0).target_bytes(), 0);
        assert_eq!(EncodeRequest::new(Codec::Png, f64::NAN).target_bytes(), 0);
        assert_eq!(EncodeRequest::new(Codec::Png, f64::INFINITY).target_bytes(), 0);
    }

    #[test]
    fn test_quality_percent() {
        let req = EncodeRequest::new(Codec::Jpeg, 1.0).with_quality_percent(90);
        assert_eq!(req.quality, 0.9);
        let req = req.with_quality_percent(0);
        assert_eq!(req.quality, 0.01);
        let req = req.with_quality_percent(250);
        assert_eq!(req.quality, 1.0);
    }

    #[test]
    fn test_file_names() {
        let jpeg = result(Codec::Jpeg);
        assert_eq!(jpeg.file_name(), "1200x630.jpg");
        assert_eq!(jpeg.download_name(), "devhero-1200x630.jpg");
        assert_eq!(result(Codec::Png).file_name(), "1200x630.png");
    }

    #[test]
    fn test_stats_summary() {
        let stats = result(Codec::Jpeg).stats();
        assert_eq!(stats.final_size, 120);
        assert_eq!(stats.padded_bytes, 20);
        assert_eq!(stats.format, "image/jpeg");
        assert_eq!(stats.ext, "jpg");
        assert!(stats.hits_target);
    }

    #[test]
    fn test_generate_error_display() {
        let err = GenerateError::InvalidDimensions { width: 0, height: 10 };
        assert_eq!(err.to_string(), "Invalid dimensions: 0x10");
        assert_eq!(GenerateError::Busy.to_string(), "A generation is already in progress");
    }
}
