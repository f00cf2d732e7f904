//! Generate options as passed from JavaScript.
//!
//! The page hands over one plain object; every field is optional and falls
//! back to the page defaults.
//!
//! ```typescript
//! const result = generator.generate({
//!   width: 1200, height: 630, targetKb: 50, format: 'jpeg', quality: 90,
//!   mode: 'glyph', glyph: '🚀', density: 3, palette: 'Ocean',
//! });
//!
//! // Or a preset, optionally turned on its side
//! generator.generate({ preset: 'ig', orientation: 'landscape', targetKb: 200 });
//! ```

use mockimage_core::encode::Codec;
use mockimage_core::generate::{EncodeRequest, GenerateError, GenerateStatus};
use mockimage_core::presets::{
    default_palette, find_palette, find_preset, Orientation, DEFAULT_COMPLEXITY,
    DEFAULT_GLYPH_DENSITY, DEFAULT_HEIGHT, DEFAULT_QUALITY_PERCENT, DEFAULT_TARGET_KB,
    DEFAULT_WIDTH, GLYPHS,
};
use mockimage_core::render::{ArtMode, Palette, RenderSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an options object could not become a request.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Rejected the same way the generator would reject it.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown art mode: {0}")]
    UnknownMode(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid colors: {0}")]
    InvalidColors(String),
}

impl OptionsError {
    /// Status label shown for this error.
    pub fn status_label(&self) -> &'static str {
        match self {
            OptionsError::Generate(err) => GenerateStatus::from_error(err).label,
            _ => "Error",
        }
    }
}

/// Options for one `generate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Width in pixels. A JS number, so cleared or negative inputs arrive
    /// intact and are reported as invalid dimensions.
    pub width: f64,
    pub height: f64,
    /// Preset id (`hd`, `fb`, `ig`, `square`, `banner`); `custom` or none
    /// uses `width`/`height`
    pub preset: Option<String>,
    /// `landscape` or `portrait`; arranges the preset's sides
    pub orientation: Option<Orientation>,
    /// Decoration density (1-5)
    pub complexity: u8,
    pub target_kb: f64,
    /// `jpeg` or `png` (MIME types are accepted too)
    pub format: String,
    /// Starting JPEG quality (1-100)
    pub quality: u8,
    /// `pattern` or `glyph`
    pub mode: String,
    pub glyph: String,
    /// Watermark density (1-10)
    pub density: u8,
    /// Named palette, e.g. `Cyberpunk`
    pub palette: Option<String>,
    /// Custom hex colours; takes precedence over `palette`
    pub colors: Option<Vec<String>>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH as f64,
            height: DEFAULT_HEIGHT as f64,
            preset: None,
            orientation: None,
            complexity: DEFAULT_COMPLEXITY,
            target_kb: DEFAULT_TARGET_KB,
            format: "jpeg".to_string(),
            quality: DEFAULT_QUALITY_PERCENT,
            mode: "pattern".to_string(),
            glyph: GLYPHS[0].to_string(),
            density: DEFAULT_GLYPH_DENSITY,
            palette: None,
            colors: None,
        }
    }
}

/// A whole, positive pixel count, saturating at `u32::MAX`.
fn pixels(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 {
        Some(value as u32)
    } else {
        None
    }
}

impl GenerateOptions {
    /// Requested dimensions after applying any preset.
    ///
    /// Upper limits are left to the generator.
    pub fn dimensions(&self) -> Result<(u32, u32), OptionsError> {
        if let Some(id) = self.preset.as_deref().filter(|id| *id != "custom") {
            let preset = find_preset(id).ok_or_else(|| OptionsError::UnknownPreset(id.into()))?;
            return Ok(match self.orientation {
                Some(orientation) => preset.dimensions(orientation),
                None => (preset.width, preset.height),
            });
        }

        match (pixels(self.width), pixels(self.height)) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(GenerateError::InvalidDimensions {
                width: self.width as u32,
                height: self.height as u32,
            }
            .into()),
        }
    }

    /// Split into what to paint and how to encode it.
    ///
    /// Size and target limits are left to the generator.
    pub fn into_request(self) -> Result<(RenderSpec, EncodeRequest), OptionsError> {
        let (width, height) = self.dimensions()?;
        let codec =
            Codec::parse(&self.format).ok_or(OptionsError::UnsupportedFormat(self.format))?;

        let mode = match self.mode.trim().to_ascii_lowercase().as_str() {
            "pattern" => ArtMode::Pattern,
            "glyph" | "emoji" => ArtMode::Glyph {
                glyph: self.glyph,
                density: self.density.clamp(1, 10),
            },
            other => return Err(OptionsError::UnknownMode(other.to_string())),
        };

        let palette = match (self.colors, self.palette) {
            (Some(colors), _) => Palette::from_hex(colors.as_slice())
                .map_err(|e| OptionsError::InvalidColors(e.to_string()))?,
            (None, Some(name)) => find_palette(&name)
                .ok_or(OptionsError::UnknownPalette(name))?
                .palette()
                .map_err(|e| OptionsError::InvalidColors(e.to_string()))?,
            (None, None) => default_palette(),
        };

        let spec = RenderSpec::new(width, height, palette)
            .with_complexity(self.complexity.clamp(1, 5))
            .with_mode(mode)
            .with_target_kb(self.target_kb);
        let request =
            EncodeRequest::new(codec, self.target_kb).with_quality_percent(self.quality);

        Ok((spec, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_size(width: f64, height: f64) -> GenerateOptions {
        GenerateOptions {
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let (spec, request) = GenerateOptions::default().into_request().unwrap();
        assert_eq!((spec.width, spec.height), (1200, 630));
        assert_eq!(spec.complexity, 3);
        assert_eq!(spec.mode, ArtMode::Pattern);
        assert_eq!(spec.palette, default_palette());
        assert_eq!(request.codec, Codec::Jpeg);
        assert_eq!(request.quality, 0.9);
        assert_eq!(request.target_bytes(), 512_000);
    }

    #[test]
    fn test_non_positive_or_fractional_width_is_invalid_dim() {
        for width in [-5.0, 0.0, 0.5, 640.5, f64::NAN, f64::INFINITY] {
            let err = with_size(width, 100.0).into_request().unwrap_err();
            assert!(
                matches!(
                    err,
                    OptionsError::Generate(GenerateError::InvalidDimensions { height: 100, .. })
                ),
                "width {} should be invalid",
                width
            );
            assert_eq!(err.status_label(), "Invalid Dim");
        }

        let err = with_size(100.0, -1.0).into_request().unwrap_err();
        assert_eq!(err.status_label(), "Invalid Dim");
    }

    #[test]
    fn test_oversized_width_passes_through() {
        let (spec, _) = with_size(9000.0, 100.0).into_request().unwrap();
        assert_eq!(spec.width, 9000);

        let (spec, _) = with_size(1e12, 100.0).into_request().unwrap();
        assert_eq!(spec.width, u32::MAX);
    }

    #[test]
    fn test_preset_dimensions() {
        let ig = GenerateOptions {
            preset: Some("ig".to_string()),
            width: -1.0,
            ..Default::default()
        };
        assert_eq!(ig.dimensions().unwrap(), (1080, 1920));

        let ig_landscape = GenerateOptions {
            orientation: Some(Orientation::Landscape),
            ..ig.clone()
        };
        assert_eq!(ig_landscape.dimensions().unwrap(), (1920, 1080));

        let banner_portrait = GenerateOptions {
            preset: Some("banner".to_string()),
            orientation: Some(Orientation::Portrait),
            ..Default::default()
        };
        assert_eq!(banner_portrait.dimensions().unwrap(), (500, 1500));
    }

    #[test]
    fn test_custom_preset_uses_width_and_height() {
        let options = GenerateOptions {
            preset: Some("custom".to_string()),
            width: 320.0,
            height: 240.0,
            ..Default::default()
        };
        assert_eq!(options.dimensions().unwrap(), (320, 240));
    }

    #[test]
    fn test_glyph_mode_and_named_palette() {
        let options = GenerateOptions {
            mode: "Glyph".to_string(),
            glyph: "★".to_string(),
            density: 40,
            palette: Some("ocean".to_string()),
            format: "image/png".to_string(),
            ..Default::default()
        };
        let (spec, request) = options.into_request().unwrap();

        assert_eq!(
            spec.mode,
            ArtMode::Glyph {
                glyph: "★".to_string(),
                density: 10
            }
        );
        assert_eq!(spec.palette, find_palette("Ocean").unwrap().palette().unwrap());
        assert_eq!(request.codec, Codec::Png);
    }

    #[test]
    fn test_custom_colors_win() {
        let options = GenerateOptions {
            colors: Some(vec!["#000".to_string(), "#fff".to_string()]),
            palette: Some("Rose".to_string()),
            ..Default::default()
        };
        let (spec, _) = options.into_request().unwrap();
        assert_eq!(spec.palette.len(), 2);
    }

    #[test]
    fn test_bad_inputs() {
        let bad_format = GenerateOptions {
            format: "webp".to_string(),
            ..Default::default()
        };
        let err = bad_format.into_request().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported format: webp");
        assert_eq!(err.status_label(), "Error");

        let bad_mode = GenerateOptions {
            mode: "noise".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_mode.into_request(),
            Err(OptionsError::UnknownMode(_))
        ));

        let bad_palette = GenerateOptions {
            palette: Some("Neon".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_palette.into_request(),
            Err(OptionsError::UnknownPalette(_))
        ));

        let bad_color = GenerateOptions {
            colors: Some(vec!["#zz0000".to_string()]),
            ..Default::default()
        };
        assert!(matches!(
            bad_color.into_request(),
            Err(OptionsError::InvalidColors(_))
        ));

        let bad_preset = GenerateOptions {
            preset: Some("poster".to_string()),
            ..Default::default()
        };
        assert_eq!(bad_preset.into_request().unwrap_err().status_label(), "Error");
    }

    #[test]
    fn test_target_limits_are_not_checked_here() {
        let options = GenerateOptions {
            target_kb: -1.0,
            ..Default::default()
        };
        let (_, request) = options.into_request().unwrap();
        assert_eq!(request.target_bytes(), 0);
    }
}
