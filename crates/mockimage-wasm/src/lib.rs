//! Mockimage WASM - WebAssembly bindings for Mockimage
//!
//! This crate provides WASM bindings to expose the mockimage-core generator
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `generator` - The `JsImageGenerator` entry point
//! - `options` - Options object accepted by `generate`
//! - `preview` - Blob URL previews for published results
//! - `types` - WASM-compatible wrapper for results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageGenerator, format_bytes } from '@mockimage/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const generator = new JsImageGenerator();
//! const result = generator.generate({ width: 1200, height: 630, targetKb: 500 });
//! console.log(`${result.download_name}: ${format_bytes(result.final_size)}`);
//! ```

use wasm_bindgen::prelude::*;

mod generator;
mod options;
mod preview;
mod types;

// Re-export public types
pub use generator::JsImageGenerator;
pub use options::{GenerateOptions, OptionsError};
pub use preview::BlobUrlStore;
pub use types::JsEncodeResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Format a byte count for display: `512 B`, `50.00 KB`, `1.50 MB`.
#[wasm_bindgen]
pub fn format_bytes(bytes: f64) -> String {
    mockimage_core::format_bytes(bytes.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512.0), "512 B");
        assert_eq!(format_bytes(51_200.0), "50.00 KB");
        assert_eq!(format_bytes(-3.0), "0 B");
    }
}
