//! Binary search over lossy encoder quality.
//!
//! Finds the quality whose encoded size is as large as possible without
//! exceeding a byte budget. Bytes left unused under the budget are wasted,
//! so a larger under-budget candidate always beats a smaller one.
//!
//! # Algorithm
//! 1. Encode at the floor quality. If that is already over budget there is
//!    nothing lower to try: return it flagged `too_large`.
//! 2. Bisect `[floor, starting_quality]` a fixed number of times, rounding
//!    each midpoint to a fixed number of decimals.
//! 3. Over budget moves `high` down; under budget moves `low` up and
//!    replaces the best candidate only when strictly larger.

use log::{debug, trace};

use super::codec::{Codec, EncodeError, EncodedImage, Encoder};
use crate::render::RasterSurface;

/// Bounds and budget for one quality search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Lowest quality tried; also the first candidate.
    pub floor_quality: f32,
    /// Number of bisection steps after the floor probe.
    pub iterations: u32,
    /// Decimal places each midpoint is rounded to.
    pub decimals: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            floor_quality: 0.01,
            iterations: 10,
            decimals: 3,
        }
    }
}

/// Result of a quality search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Largest candidate found within budget (or the floor encode when
    /// `too_large`).
    pub image: EncodedImage,
    /// Quality that produced `image`.
    pub quality: f32,
    /// The floor encode already exceeded the budget.
    pub too_large: bool,
    /// Number of encoder calls made.
    pub encodes: u32,
}

/// Round `value` to `decimals` places.
#[inline]
pub fn round_quality(value: f32, decimals: u32) -> f32 {
    let scale = 10f32.powi(decimals.min(6) as i32);
    (value * scale).round() / scale
}

/// Search for the highest-yield quality at or under `target_bytes`.
///
/// Encoder failures abort the search; there is no retry.
pub fn tune_quality<E: Encoder + ?Sized>(
    encoder: &E,
    surface: &dyn RasterSurface,
    codec: Codec,
    target_bytes: u64,
    starting_quality: f32,
    params: &SearchParams,
) -> Result<SearchOutcome, EncodeError> {
    let floor = params.floor_quality;
    let mut low = floor;
    let mut high = starting_quality.max(floor);

    let mut best = encoder.encode(surface, codec, floor)?;
    let mut best_quality = floor;
    let mut encodes = 1;

    if best.len() as u64 > target_bytes {
        debug!(
            "floor quality {} yields {} bytes, over target {}",
            floor,
            best.len(),
            target_bytes
        );
        return Ok(SearchOutcome {
            image: best,
            quality: floor,
            too_large: true,
            encodes,
        });
    }

    for step in 0..params.iterations {
        let mid = round_quality((low + high) / 2.0, params.decimals);
        let candidate = encoder.encode(surface, codec, mid)?;
        encodes += 1;
        let size = candidate.len() as u64;
        trace!("search step {}: q={} -> {} bytes", step, mid, size);

        if size > target_bytes {
            high = mid;
        } else {
            if candidate.len() > best.len() {
                best = candidate;
                best_quality = mid;
            }
            low = mid;
        }
    }

    debug!(
        "search settled on q={} ({} bytes, target {}) after {} encodes",
        best_quality,
        best.len(),
        target_bytes,
        encodes
    );

    Ok(SearchOutcome {
        image: best,
        quality: best_quality,
        too_large: false,
        encodes,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::Surface;
    use std::cell::RefCell;

    /// Encoder whose output size is a function of quality.
    pub(crate) struct CurveEncoder<F> {
        pub curve: F,
        pub calls: RefCell<Vec<f32>>,
    }

    impl<F: Fn(f32) -> usize> CurveEncoder<F> {
        pub fn new(curve: F) -> Self {
            Self {
                curve,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl<F: Fn(f32) -> usize> Encoder for CurveEncoder<F> {
        fn encode(
            &self,
            _surface: &dyn RasterSurface,
            codec: Codec,
            quality: f32,
        ) -> Result<EncodedImage, EncodeError> {
            self.calls.borrow_mut().push(quality);
            Ok(EncodedImage::new(codec, vec![0u8; (self.curve)(quality)]))
        }
    }

    fn linear(q: f32) -> usize {
        1_000 + (q * 100_000.0) as usize
    }

    fn surface() -> Surface {
        Surface::new(4, 4)
    }

    #[test]
    fn test_round_quality() {
        assert_eq!(round_quality(0.4554, 3), 0.455);
        assert_eq!(round_quality(0.5, 3), 0.5);
        assert_eq!(round_quality(0.12345, 2), 0.12);
    }

    #[test]
    fn test_floor_over_target_is_too_large() {
        let encoder = CurveEncoder::new(linear);
        let outcome = tune_quality(
            &encoder,
            &surface(),
            Codec::Jpeg,
            500,
            0.9,
            &SearchParams::default(),
        )
        .unwrap();

        assert!(outcome.too_large);
        assert_eq!(outcome.quality, 0.01);
        assert_eq!(outcome.image.len(), linear(0.01));
        assert_eq!(encoder.call_count(), 1);
        assert_eq!(outcome.encodes, 1);
    }

    #[test]
    fn test_search_stays_under_target() {
        let encoder = CurveEncoder::new(linear);
        let target = 50_000;
        let outcome = tune_quality(
            &encoder,
            &surface(),
            Codec::Jpeg,
            target,
            0.9,
            &SearchParams::default(),
        )
        .unwrap();

        assert!(!outcome.too_large);
        assert!(outcome.image.len() as u64 <= target);
        // 1 floor probe + 10 bisection steps
        assert_eq!(encoder.call_count(), 11);
        // Optimum is q=0.49 (50_000 bytes); ten steps over [0.01, 0.9] get close.
        assert!(outcome.image.len() > 49_000, "got {}", outcome.image.len());
        assert_eq!(outcome.image.len(), linear(outcome.quality));
    }

    #[test]
    fn test_first_midpoint_is_rounded() {
        let encoder = CurveEncoder::new(linear);
        tune_quality(
            &encoder,
            &surface(),
            Codec::Jpeg,
            50_000,
            0.9,
            &SearchParams::default(),
        )
        .unwrap();

        let calls = encoder.calls.borrow();
        assert_eq!(calls[0], 0.01);
        // (0.01 + 0.9) / 2 = 0.455
        assert_eq!(calls[1], 0.455);
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        // Flat curve: every quality yields the same size.
        let encoder = CurveEncoder::new(|_: f32| 100usize);
        let outcome = tune_quality(
            &encoder,
            &surface(),
            Codec::Jpeg,
            1_000,
            0.9,
            &SearchParams::default(),
        )
        .unwrap();

        assert_eq!(outcome.quality, 0.01);
        // Under budget every step, so the search keeps climbing.
        let calls = encoder.calls.borrow();
        assert!(calls.windows(2).skip(1).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_zero_iterations_returns_floor() {
        let encoder = CurveEncoder::new(linear);
        let params = SearchParams {
            iterations: 0,
            ..SearchParams::default()
        };
        let outcome =
            tune_quality(&encoder, &surface(), Codec::Jpeg, 50_000, 0.9, &params).unwrap();
        assert_eq!(outcome.quality, 0.01);
        assert!(!outcome.too_large);
    }

    #[test]
    fn test_encoder_failure_propagates() {
        struct Failing;
        impl Encoder for Failing {
            fn encode(
                &self,
                _surface: &dyn RasterSurface,
                codec: Codec,
                _quality: f32,
            ) -> Result<EncodedImage, EncodeError> {
                Err(EncodeError::EncodingFailed {
                    codec,
                    message: "no bytes".to_string(),
                })
            }
        }

        let result = tune_quality(
            &Failing,
            &surface(),
            Codec::Jpeg,
            1_000,
            0.9,
            &SearchParams::default(),
        );
        assert!(matches!(result, Err(EncodeError::EncodingFailed { .. })));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::tests::CurveEncoder;
    use super::*;
    use crate::render::Surface;
    use proptest::prelude::*;

    proptest! {
        /// Property: A non-too-large outcome never exceeds the budget.
        #[test]
        fn prop_outcome_within_budget(
            target in 2_000u64..=120_000,
            start in 0.05f32..=1.0,
            slope in 10_000f32..=200_000.0,
        ) {
            let encoder = CurveEncoder::new(move |q: f32| 1_000 + (q * slope) as usize);
            let outcome = tune_quality(
                &encoder,
                &Surface::new(1, 1),
                Codec::Jpeg,
                target,
                start,
                &SearchParams::default(),
            ).unwrap();

            if outcome.too_large {
                prop_assert!(outcome.image.len() as u64 > target);
            } else {
                prop_assert!(outcome.image.len() as u64 <= target);
            }
        }

        /// Property: One more bisection step never shrinks the best candidate.
        #[test]
        fn prop_more_iterations_never_worse(
            target in 2_000u64..=120_000,
            iterations in 0u32..=12,
        ) {
            let curve = |q: f32| 1_000 + (q * 100_000.0) as usize;
            let run = |iterations| {
                let params = SearchParams { iterations, ..SearchParams::default() };
                tune_quality(
                    &CurveEncoder::new(curve),
                    &Surface::new(1, 1),
                    Codec::Jpeg,
                    target,
                    0.9,
                    &params,
                ).unwrap()
            };

            let fewer = run(iterations);
            let more = run(iterations + 1);
            prop_assert!(more.image.len() >= fewer.image.len());
        }
    }
}
