//! Generator limits and tuning.

use serde::{Deserialize, Serialize};

use crate::encode::{SearchParams, MAX_ENTROPY_CHUNK};

/// Maximum width or height in pixels.
pub const MAX_DIMENSION: u32 = 6_000;

/// Maximum pixel count (width * height).
pub const MAX_AREA: u64 = 16_000_000;

/// Largest accepted target size in KB (256 MiB).
pub const MAX_TARGET_KB: f64 = 262_144.0;

/// Limits and search tuning for a `Generator`.
///
/// Every field has a default, so partial configs deserialize cleanly:
///
/// ```ignore
/// let config: GeneratorConfig = serde_json::from_str(r#"{ "min_target_kb": 1.0 }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum width or height in pixels
    pub max_dimension: u32,
    /// Maximum pixel count
    pub max_area: u64,
    /// Smallest accepted target in KB (0 disables the check)
    pub min_target_kb: f64,
    /// Largest accepted target in KB; bounds the padding allocation
    pub max_target_kb: f64,
    /// Lowest JPEG quality the search tries
    pub floor_quality: f32,
    /// Bisection steps after the floor probe
    pub search_iterations: u32,
    /// Decimal places search midpoints are rounded to
    pub quality_decimals: u32,
    /// A result hits its target when it is fewer than this many bytes short
    pub hit_tolerance: u64,
    /// Largest single request to the entropy source while padding
    pub padding_chunk: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            max_area: MAX_AREA,
            min_target_kb: 0.0,
            max_target_kb: MAX_TARGET_KB,
            floor_quality: 0.01,
            search_iterations: 10,
            quality_decimals: 3,
            hit_tolerance: 2,
            padding_chunk: MAX_ENTROPY_CHUNK,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search parameters derived from this config.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            floor_quality: self.floor_quality,
            iterations: self.search_iterations,
            decimals: self.quality_decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_limits() {
        let config = GeneratorConfig::new();
        assert_eq!(config.max_dimension, 6_000);
        assert_eq!(config.max_area, 16_000_000);
        assert_eq!(config.min_target_kb, 0.0);
        assert_eq!(config.max_target_kb, 262_144.0);
        assert_eq!(config.hit_tolerance, 2);
        assert_eq!(config.padding_chunk, 65_536);
    }

    #[test]
    fn test_search_params_follow_config() {
        let mut config = GeneratorConfig::new();
        config.search_iterations = 8;
        config.floor_quality = 0.25;

        let params = config.search_params();
        assert_eq!(params.iterations, 8);
        assert_eq!(params.floor_quality, 0.25);
        assert_eq!(params.decimals, 3);
    }

    #[test]
    fn test_default_search_params_agree() {
        assert_eq!(GeneratorConfig::new().search_params(), SearchParams::default());
    }
}
