//! Generator WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsImageGenerator } from '@mockimage/wasm';
//!
//! const generator = new JsImageGenerator();
//! try {
//!   const result = generator.generate({ width: 1200, height: 630, targetKb: 50 });
//!   img.src = result.url;
//!   link.download = result.download_name;
//! } catch (e) {
//!   status.textContent = e.name; // "Invalid Dim", "Too Large", "Busy", ...
//! }
//! ```

use mockimage_core::config::GeneratorConfig;
use mockimage_core::encode::ImageCrateEncoder;
use mockimage_core::generate::{GenerateStatus, Generator};
use mockimage_core::render::ArtworkPainter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::options::GenerateOptions;
use crate::preview::BlobUrlStore;
use crate::types::JsEncodeResult;

type BrowserGenerator = Generator<ArtworkPainter<StdRng>, ImageCrateEncoder, BlobUrlStore>;

/// Mock image generator for the browser.
///
/// Holds the last published result and its object URL. Call `free()` (or
/// let the finalizer run) to revoke the URL.
#[wasm_bindgen]
pub struct JsImageGenerator {
    inner: BrowserGenerator,
}

#[wasm_bindgen]
impl JsImageGenerator {
    /// Create a generator. `config` is an optional `GeneratorConfig` object;
    /// missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsImageGenerator, JsValue> {
        let config: GeneratorConfig = if config.is_undefined() || config.is_null() {
            GeneratorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| js_error(&e.to_string(), "Error"))?
        };
        Ok(Self::with_config(config))
    }

    /// Render, encode and publish one image.
    ///
    /// Errors are thrown as `Error` objects whose `name` is the status label
    /// (`Invalid Dim`, `Too Large`, `Invalid Size`, `Busy`, or `Error`).
    /// The previous result (and its URL) stays valid when this throws.
    pub fn generate(&self, options: JsValue) -> Result<JsEncodeResult, JsValue> {
        let options: GenerateOptions = if options.is_undefined() || options.is_null() {
            GenerateOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| js_error(&e.to_string(), "Error"))?
        };
        let (spec, request) = options
            .into_request()
            .map_err(|e| js_error(&e.to_string(), e.status_label()))?;

        let result = self
            .inner
            .generate(&spec, &request)
            .map_err(|e| js_error(&e.to_string(), GenerateStatus::from_error(&e).label))?;
        let url = self.inner.current_handle().unwrap_or_default();
        Ok(JsEncodeResult::new(result, url))
    }

    /// The last published result, if any.
    pub fn current(&self) -> Option<JsEncodeResult> {
        let result = self.inner.current()?;
        let url = self.inner.current_handle()?;
        Some(JsEncodeResult::new(result, url))
    }

    /// Drop the published result and revoke its URL.
    pub fn clear(&self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.inner.is_busy()
    }

    /// Current pipeline phase, e.g. `Searching`
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        format!("{:?}", self.inner.phase())
    }
}

impl JsImageGenerator {
    fn with_config(config: GeneratorConfig) -> Self {
        let painter = ArtworkPainter::new(StdRng::seed_from_u64(artwork_seed()));
        Self {
            inner: Generator::new(config, painter, ImageCrateEncoder, BlobUrlStore),
        }
    }
}

fn artwork_seed() -> u64 {
    let mut seed = [0u8; 8];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => u64::from_le_bytes(seed),
        Err(_) => 0,
    }
}

fn js_error(message: &str, name: &str) -> JsValue {
    let js = js_sys::Error::new(message);
    js.set_name(name);
    js.into()
}
