//! WASM-compatible wrapper for a generation result.

use std::sync::Arc;

use mockimage_core::format_bytes;
use mockimage_core::generate::{EncodeResult, GenerateStatus};
use wasm_bindgen::prelude::*;

/// A published generation result for JavaScript.
///
/// The preview URL stays valid until the generator publishes a newer
/// result, is cleared, or is freed.
#[wasm_bindgen]
pub struct JsEncodeResult {
    result: Arc<EncodeResult>,
    url: String,
}

impl JsEncodeResult {
    pub(crate) fn new(result: Arc<EncodeResult>, url: String) -> Self {
        Self { result, url }
    }
}

#[wasm_bindgen]
impl JsEncodeResult {
    /// Object URL of the encoded blob
    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.url.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.result.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.result.height
    }

    /// Size of the final blob in bytes, padding included
    #[wasm_bindgen(getter)]
    pub fn final_size(&self) -> f64 {
        self.result.final_size() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn target_bytes(&self) -> f64 {
        self.result.target_bytes as f64
    }

    #[wasm_bindgen(getter)]
    pub fn padding_bytes(&self) -> f64 {
        self.result.padding_bytes as f64
    }

    #[wasm_bindgen(getter)]
    pub fn quality_used(&self) -> f32 {
        self.result.quality_used
    }

    #[wasm_bindgen(getter)]
    pub fn hits_target(&self) -> bool {
        self.result.hits_target
    }

    #[wasm_bindgen(getter)]
    pub fn is_too_large(&self) -> bool {
        self.result.is_too_large
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.result.mime().to_string()
    }

    /// Suggested download file name, e.g. `devhero-1200x630.jpg`
    #[wasm_bindgen(getter)]
    pub fn download_name(&self) -> String {
        self.result.download_name()
    }

    /// Final size for display, e.g. `50.00 KB`
    #[wasm_bindgen(getter)]
    pub fn formatted_size(&self) -> String {
        format_bytes(self.result.final_size())
    }

    /// Status label: `Done` or `Capped at min quality`
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        GenerateStatus::from_result(&self.result).label.to_string()
    }

    /// All sizes and flags as a plain object (camelCase keys).
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.result.stats())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the encoded bytes as Uint8Array.
    ///
    /// Note: This creates a copy. Prefer `url` for display and download.
    pub fn bytes(&self) -> Vec<u8> {
        self.result.image.bytes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockimage_core::encode::{Codec, EncodedImage};

    fn result(is_too_large: bool) -> JsEncodeResult {
        let result = EncodeResult {
            image: EncodedImage::new(Codec::Jpeg, vec![0; 2048]),
            width: 1200,
            height: 630,
            target_bytes: 2048,
            initial_size: 4000,
            base_size: 1500,
            padding_bytes: 548,
            quality_used: 0.42,
            hits_target: !is_too_large,
            is_too_large,
        };
        JsEncodeResult::new(Arc::new(result), "blob:test".to_string())
    }

    #[test]
    fn test_getters() {
        let js = result(false);
        assert_eq!(js.url(), "blob:test");
        assert_eq!(js.final_size(), 2048.0);
        assert_eq!(js.padding_bytes(), 548.0);
        assert_eq!(js.download_name(), "devhero-1200x630.jpg");
        assert_eq!(js.formatted_size(), "2.00 KB");
        assert_eq!(js.mime(), "image/jpeg");
        assert_eq!(js.bytes().len(), 2048);
        assert_eq!(js.status(), "Done");
    }

    #[test]
    fn test_capped_status() {
        assert_eq!(result(true).status(), "Capped at min quality");
    }
}
