//! Byte-exact padding with random filler.
//!
//! Appends random bytes after an encoded image so the blob reaches an exact
//! size. Decoders stop at the end-of-image marker, so trailing bytes do not
//! affect the picture.
//!
//! Filler comes from the operating system's entropy source, requested in
//! bounded chunks. When that source is unavailable the caller's
//! non-cryptographic generator is used instead: padding is cosmetic filler,
//! not a security boundary.

use log::warn;
use rand::RngCore;

use super::codec::EncodedImage;

/// Largest single request made to the entropy source.
pub const MAX_ENTROPY_CHUNK: usize = 65_536;

/// Source of cryptographically strong bytes.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), getrandom::Error>;
}

/// The operating system's entropy source (`crypto.getRandomValues` on the web).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), getrandom::Error> {
        getrandom::getrandom(buf)
    }
}

/// A padded image and how many bytes were appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Padded {
    pub image: EncodedImage,
    pub padding: usize,
}

/// Pad `image` up to `target_bytes`.
///
/// Images at or above the target are returned unchanged with zero padding.
/// The result is always `max(image.len(), target_bytes)` bytes long and
/// keeps the original codec.
pub fn add_padding<S, R>(
    image: EncodedImage,
    target_bytes: usize,
    entropy: &mut S,
    fallback: &mut R,
) -> Padded
where
    S: EntropySource + ?Sized,
    R: RngCore + ?Sized,
{
    add_padding_chunked(image, target_bytes, MAX_ENTROPY_CHUNK, entropy, fallback)
}

/// `add_padding` with an explicit entropy chunk size.
pub fn add_padding_chunked<S, R>(
    mut image: EncodedImage,
    target_bytes: usize,
    chunk: usize,
    entropy: &mut S,
    fallback: &mut R,
) -> Padded
where
    S: EntropySource + ?Sized,
    R: RngCore + ?Sized,
{
    let start = image.len();
    let needed = target_bytes.saturating_sub(start);
    if needed == 0 {
        return Padded { image, padding: 0 };
    }

    // Filled in place: the blob is the only full-size allocation.
    image.bytes.resize(target_bytes, 0);
    let padding = &mut image.bytes[start..];
    if let Err(err) = fill_chunked(padding, chunk.max(1), entropy) {
        warn!("entropy source unavailable ({}), using fallback generator for padding", err);
        fallback.fill_bytes(padding);
    }

    Padded {
        image,
        padding: needed,
    }
}

fn fill_chunked<S: EntropySource + ?Sized>(
    buf: &mut [u8],
    chunk: usize,
    entropy: &mut S,
) -> Result<(), getrandom::Error> {
    for piece in buf.chunks_mut(chunk) {
        entropy.fill(piece)?;
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::encode::Codec;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    proptest! {
        /// Property: Output length is max(original, target) and the original
        /// bytes are an untouched prefix.
        #[test]
        fn prop_padding_exactness(
            original in prop::collection::vec(any::<u8>(), 0..512),
            target in 0usize..2_048,
        ) {
            let image = EncodedImage::new(Codec::Jpeg, original.clone());
            let padded = add_padding(image, target, &mut OsEntropy, &mut StdRng::seed_from_u64(1));

            prop_assert_eq!(padded.image.len(), original.len().max(target));
            prop_assert_eq!(padded.padding, target.saturating_sub(original.len()));
            prop_assert_eq!(&padded.image.bytes[..original.len()], &original[..]);
        }
    }
}
