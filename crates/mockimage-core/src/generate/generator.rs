//! The generate pipeline.
//!
//! `Validate -> Render -> Encode -> [Search] -> [Pad] -> Publish`, one step
//! after another. A generator runs one generation at a time: a call made
//! while another is in flight is rejected with `GenerateError::Busy`, never
//! queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::preview::PreviewStore;
use super::types::{EncodeRequest, EncodeResult, GenerateError, Phase};
use crate::config::GeneratorConfig;
use crate::encode::{
    add_padding_chunked, tune_quality, EncodeError, Encoder, EntropySource, OsEntropy,
};
use crate::render::{Painter, RasterSurface, RenderSpec};

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the busy flag when a generation ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Where padding filler comes from.
struct PaddingSources {
    entropy: Box<dyn EntropySource + Send>,
    fallback: Box<dyn RngCore + Send>,
}

impl Default for PaddingSources {
    fn default() -> Self {
        let mut seed = [0u8; 8];
        // Without OS entropy the fallback filler is seeded from a constant.
        let seed = match OsEntropy.fill(&mut seed) {
            Ok(()) => u64::from_le_bytes(seed),
            Err(_) => 0x6d6f_636b_696d_6167,
        };
        Self {
            entropy: Box::new(OsEntropy),
            fallback: Box::new(StdRng::seed_from_u64(seed)),
        }
    }
}

struct Published<H> {
    result: Arc<EncodeResult>,
    handle: H,
}

/// The preview store plus the one result it currently backs.
struct PreviewSlot<S: PreviewStore> {
    store: S,
    current: Option<Published<S::Handle>>,
}

impl<S: PreviewStore> PreviewSlot<S> {
    fn replace(&mut self, next: Option<Published<S::Handle>>) {
        if let Some(previous) = std::mem::replace(&mut self.current, next) {
            self.store.release(previous.handle);
        }
    }
}

impl<S: PreviewStore> Drop for PreviewSlot<S> {
    fn drop(&mut self) {
        self.replace(None);
    }
}

/// Renders, encodes and publishes mock images.
pub struct Generator<P, E, S: PreviewStore> {
    config: GeneratorConfig,
    painter: Mutex<P>,
    encoder: E,
    padding: Mutex<PaddingSources>,
    preview: Mutex<PreviewSlot<S>>,
    phase: Mutex<Phase>,
    busy: AtomicBool,
}

impl<P, E, S> Generator<P, E, S>
where
    P: Painter,
    E: Encoder,
    S: PreviewStore,
{
    pub fn new(config: GeneratorConfig, painter: P, encoder: E, store: S) -> Self {
        Self {
            config,
            painter: Mutex::new(painter),
            encoder,
            padding: Mutex::new(PaddingSources::default()),
            preview: Mutex::new(PreviewSlot {
                store,
                current: None,
            }),
            phase: Mutex::new(Phase::Idle),
            busy: AtomicBool::new(false),
        }
    }

    /// Replace the padding filler sources.
    pub fn with_padding_source<N, F>(self, entropy: N, fallback: F) -> Self
    where
        N: EntropySource + Send + 'static,
        F: RngCore + Send + 'static,
    {
        *lock(&self.padding) = PaddingSources {
            entropy: Box::new(entropy),
            fallback: Box::new(fallback),
        };
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        *lock(&self.phase)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The most recently published result.
    pub fn current(&self) -> Option<Arc<EncodeResult>> {
        lock(&self.preview)
            .current
            .as_ref()
            .map(|p| Arc::clone(&p.result))
    }

    /// Preview handle of the most recently published result.
    pub fn current_handle(&self) -> Option<S::Handle>
    where
        S::Handle: Clone,
    {
        lock(&self.preview).current.as_ref().map(|p| p.handle.clone())
    }

    /// Run `f` against the preview store.
    pub fn with_store<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&lock(&self.preview).store)
    }

    /// Drop the published result and release its handle.
    pub fn clear(&self) {
        lock(&self.preview).replace(None);
        *lock(&self.phase) = Phase::Idle;
    }

    /// Check dimensions and target size against the configured limits.
    pub fn validate(
        &self,
        spec: &RenderSpec,
        request: &EncodeRequest,
    ) -> Result<(), GenerateError> {
        self.checked_target_len(spec, request).map(|_| ())
    }

    /// `validate`, returning the target as a buffer length.
    fn checked_target_len(
        &self,
        spec: &RenderSpec,
        request: &EncodeRequest,
    ) -> Result<usize, GenerateError> {
        let (width, height) = (spec.width, spec.height);
        if width == 0 || height == 0 {
            return Err(GenerateError::InvalidDimensions { width, height });
        }
        if width > self.config.max_dimension
            || height > self.config.max_dimension
            || spec.area() > self.config.max_area
        {
            return Err(GenerateError::DimensionsTooLarge {
                width,
                height,
                max_dimension: self.config.max_dimension,
                max_area: self.config.max_area,
            });
        }

        let target_kb = request.target_kb;
        let in_range = target_kb.is_finite()
            && target_kb > 0.0
            && target_kb >= self.config.min_target_kb
            && target_kb <= self.config.max_target_kb;
        if !in_range || request.target_bytes() == 0 {
            return Err(GenerateError::InvalidTargetSize { target_kb });
        }
        // Must fit one allocation on this target (4 GiB on wasm32).
        usize::try_from(request.target_bytes())
            .ok()
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(GenerateError::InvalidTargetSize { target_kb })
    }

    /// Generate and publish one image.
    ///
    /// On success the new result replaces the previous one and the previous
    /// preview handle is released. On any error the previous result stays
    /// published.
    pub fn generate(
        &self,
        spec: &RenderSpec,
        request: &EncodeRequest,
    ) -> Result<Arc<EncodeResult>, GenerateError> {
        let _busy = BusyGuard::acquire(&self.busy).ok_or(GenerateError::Busy)?;

        self.set_phase(Phase::Validating);
        let target_len = match self.checked_target_len(spec, request) {
            Ok(len) => len,
            Err(err) => {
                debug!("rejected generation: {}", err);
                self.set_phase(Phase::Rejected);
                return Err(err);
            }
        };

        self.set_phase(Phase::Rendering);
        let surface = lock(&self.painter).paint(spec);

        let result = match self.encode_to_target(&surface, request, target_len) {
            Ok(result) => Arc::new(result),
            Err(err) => {
                warn!("generation failed: {}", err);
                self.set_phase(Phase::Failed);
                return Err(err.into());
            }
        };

        if let Err(err) = self.publish(Arc::clone(&result)) {
            warn!("could not publish result: {}", err);
            self.set_phase(Phase::Failed);
            return Err(err);
        }

        if result.is_too_large {
            warn!(
                "{} is {} bytes at minimum quality, over the {} byte target",
                result.file_name(),
                result.final_size(),
                result.target_bytes
            );
        } else {
            info!(
                "generated {} ({} bytes, target {}, q={}, padding {})",
                result.file_name(),
                result.final_size(),
                result.target_bytes,
                result.quality_used,
                result.padding_bytes
            );
        }
        self.set_phase(Phase::Done);
        Ok(result)
    }

    fn encode_to_target(
        &self,
        surface: &P::Surface,
        request: &EncodeRequest,
        target_len: usize,
    ) -> Result<EncodeResult, EncodeError> {
        let codec = request.codec;
        let target = request.target_bytes();

        self.set_phase(Phase::Encoding);
        let starting_quality = if codec.is_lossy() { request.quality } else { 1.0 };
        let mut working = self.encoder.encode(surface, codec, starting_quality)?;
        let mut quality = starting_quality;
        let initial_size = working.len() as u64;

        if codec.is_lossy() && initial_size > target {
            self.set_phase(Phase::Searching);
            let outcome = tune_quality(
                &self.encoder,
                surface,
                codec,
                target,
                starting_quality,
                &self.config.search_params(),
            )?;
            working = outcome.image;
            quality = outcome.quality;
        }

        let base_size = working.len() as u64;
        let is_too_large = base_size > target;
        let mut padding_bytes = 0;

        if !is_too_large && base_size < target {
            self.set_phase(Phase::Padding);
            let mut sources = lock(&self.padding);
            let PaddingSources { entropy, fallback } = &mut *sources;
            let padded = add_padding_chunked(
                working,
                target_len,
                self.config.padding_chunk,
                entropy.as_mut(),
                fallback.as_mut(),
            );
            working = padded.image;
            padding_bytes = padded.padding as u64;
        }

        let final_size = working.len() as u64;
        let hits_target = !is_too_large && target - final_size < self.config.hit_tolerance;

        Ok(EncodeResult {
            image: working,
            width: surface.width(),
            height: surface.height(),
            target_bytes: target,
            initial_size,
            base_size,
            padding_bytes,
            quality_used: quality,
            hits_target,
            is_too_large,
        })
    }

    fn publish(&self, result: Arc<EncodeResult>) -> Result<(), GenerateError> {
        let mut slot = lock(&self.preview);
        let handle = slot.store.create(&result.image)?;
        slot.replace(Some(Published { result, handle }));
        Ok(())
    }

    fn set_phase(&self, phase: Phase) {
        debug!("phase -> {:?}", phase);
        *lock(&self.phase) = phase;
    }
}
