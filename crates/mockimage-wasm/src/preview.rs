//! Blob URL previews.
//!
//! Each published result gets one object URL so the page can show and
//! download it. The generator revokes the URL when the result is replaced,
//! cleared, or the generator is freed.

use js_sys::{Array, Uint8Array};
use mockimage_core::encode::EncodedImage;
use mockimage_core::generate::{PreviewError, PreviewStore};
use wasm_bindgen::JsValue;
use web_sys::{console, Blob, BlobPropertyBag, Url};

/// `PreviewStore` backed by `URL.createObjectURL`.
#[derive(Debug, Default)]
pub struct BlobUrlStore;

impl PreviewStore for BlobUrlStore {
    type Handle = String;

    fn create(&mut self, image: &EncodedImage) -> Result<String, PreviewError> {
        let parts = Array::new();
        parts.push(&Uint8Array::from(image.bytes.as_slice()));

        let options = BlobPropertyBag::new();
        options.set_type(image.mime());

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(preview_error)?;
        Url::create_object_url_with_blob(&blob).map_err(preview_error)
    }

    fn release(&mut self, handle: String) {
        if let Err(err) = Url::revoke_object_url(&handle) {
            console::warn_2(&JsValue::from_str("failed to revoke preview URL"), &err);
        }
    }
}

fn preview_error(err: JsValue) -> PreviewError {
    PreviewError(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
