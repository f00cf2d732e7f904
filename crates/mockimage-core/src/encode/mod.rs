//! Target-size encoding pipeline.
//!
//! This module provides functionality for:
//! - Encoding surfaces to JPEG (lossy) or PNG (lossless)
//! - Searching JPEG quality for the largest output under a byte budget
//! - Padding encoded output with random filler up to an exact byte size
//!
//! # Architecture
//!
//! Encoding goes through the `Encoder` trait so the generator never depends
//! on a particular image library. All operations are synchronous; a search
//! issues its encodes strictly one after another.
//!
//! # Examples
//!
//! ```ignore
//! use mockimage_core::encode::{tune_quality, Codec, ImageCrateEncoder, SearchParams};
//!
//! let outcome = tune_quality(&ImageCrateEncoder, &surface, Codec::Jpeg, 51_200, 0.9,
//!     &SearchParams::default()).unwrap();
//! println!("q={} -> {} bytes", outcome.quality, outcome.image.len());
//! ```

mod codec;
mod padding;
mod search;

pub use codec::{
    encode_jpeg, encode_png, jpeg_quality, Codec, EncodeError, EncodedImage, Encoder,
    ImageCrateEncoder,
};
pub use padding::{
    add_padding, add_padding_chunked, EntropySource, OsEntropy, Padded, MAX_ENTROPY_CHUNK,
};
pub use search::{round_quality, tune_quality, SearchOutcome, SearchParams};
