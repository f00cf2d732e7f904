//! Preview handles for published results.
//!
//! A preview handle is whatever the host needs to display a result (a blob
//! URL in the browser). The generator owns the handle of the result it last
//! published and releases it exactly once: when a newer result replaces it,
//! when the generator is cleared, or when the generator is dropped.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::encode::EncodedImage;

/// The host could not create a preview for a result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Preview unavailable: {0}")]
pub struct PreviewError(pub String);

/// Creates and releases preview handles.
pub trait PreviewStore {
    type Handle;

    fn create(&mut self, image: &EncodedImage) -> Result<Self::Handle, PreviewError>;

    /// Release a handle. Called exactly once per created handle.
    fn release(&mut self, handle: Self::Handle);
}

/// Identifier handed out by `MemoryPreviewStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreviewId(pub u64);

/// In-process preview store that tracks which handles are live.
#[derive(Debug, Default)]
pub struct MemoryPreviewStore {
    next_id: u64,
    live: BTreeSet<PreviewId>,
    released: u64,
}

impl MemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Handles released so far.
    pub fn released_count(&self) -> u64 {
        self.released
    }

    pub fn is_live(&self, id: PreviewId) -> bool {
        self.live.contains(&id)
    }
}

impl PreviewStore for MemoryPreviewStore {
    type Handle = PreviewId;

    fn create(&mut self, _image: &EncodedImage) -> Result<PreviewId, PreviewError> {
        let id = PreviewId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        Ok(id)
    }

    fn release(&mut self, handle: PreviewId) {
        if self.live.remove(&handle) {
            self.released += 1;
        }
    }
}
