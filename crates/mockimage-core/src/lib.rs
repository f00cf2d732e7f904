//! Mockimage Core - Target-size mock image generator
//!
//! This crate provides the core functionality for Mockimage: painting
//! placeholder artwork, encoding it to JPEG or PNG, searching JPEG quality
//! for the largest output under a byte budget, and padding the result to an
//! exact size.

pub mod config;
pub mod encode;
pub mod format;
pub mod generate;
pub mod presets;
pub mod render;

pub use config::GeneratorConfig;
pub use encode::{Codec, EncodeError, EncodedImage, Encoder, ImageCrateEncoder};
pub use format::format_bytes;
pub use generate::{
    EncodeRequest, EncodeResult, GenerateError, GenerateStatus, Generator, MemoryPreviewStore,
    Phase, PreviewStore,
};
pub use render::{ArtMode, ArtworkPainter, Painter, Palette, RenderSpec, Rgb};
