//! Generation orchestration.
//!
//! This module provides functionality for:
//! - Validating a request against dimension and target-size limits
//! - Running render, encode, quality search and padding in order
//! - Publishing the result with a preview handle and releasing the old one
//! - Mapping outcomes to a short status line
//!
//! # Architecture
//!
//! `Generator` is generic over its capabilities (`Painter`, `Encoder`,
//! `PreviewStore`), so the pipeline runs natively in tests and against
//! browser blob URLs in the WASM crate. A generator admits one generation at
//! a time and rejects overlapping calls with `GenerateError::Busy`.
//!
//! # Examples
//!
//! ```ignore
//! use mockimage_core::encode::{Codec, ImageCrateEncoder};
//! use mockimage_core::generate::{EncodeRequest, Generator, MemoryPreviewStore};
//! use mockimage_core::render::{ArtworkPainter, RenderSpec};
//!
//! let generator = Generator::new(config, ArtworkPainter::new(rng), ImageCrateEncoder,
//!     MemoryPreviewStore::new());
//! let result = generator.generate(&spec, &EncodeRequest::new(Codec::Jpeg, 500.0))?;
//! println!("{} bytes", result.final_size());
//! ```

mod generator;
mod preview;
mod status;
mod types;

pub use generator::Generator;
pub use preview::{MemoryPreviewStore, PreviewError, PreviewId, PreviewStore};
pub use status::{GenerateStatus, StatusTone};
pub use types::{EncodeRequest, EncodeResult, EncodeStats, GenerateError, Phase};
