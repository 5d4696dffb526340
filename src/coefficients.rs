use rand::{rngs::OsRng, CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Result, SharingError};
use crate::field::{FieldElement, ELEMENT_BYTES};

/// Upper bound on draws for a single coefficient. Each draw is accepted
/// with probability P / 2^257 (about 0.9).
pub const MAX_DRAWS_PER_COEFFICIENT: usize = 128;

/// Draws `count` coefficients from the OS CSPRNG.
pub fn random_coefficients(count: usize) -> Result<Vec<FieldElement>> {
    random_coefficients_with(&mut OsRng, count)
}

/// Draws `count` coefficients uniformly from [0, P).
///
/// Each draw is 33 bytes with everything above bit 256 masked off, read
/// big-endian, and rejected if it is not below P. Plain reduction of 32
/// bytes would be no good here: 2^256 < P, so about 44% of the field
/// would never be drawn.
pub fn random_coefficients_with<R>(rng: &mut R, count: usize) -> Result<Vec<FieldElement>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buf = Zeroizing::new([0u8; ELEMENT_BYTES]);
    (0..count)
        .map(|_| sample_element(&mut *rng, &mut buf))
        .collect()
}

fn sample_element<R>(rng: &mut R, buf: &mut [u8; ELEMENT_BYTES]) -> Result<FieldElement>
where
    R: RngCore + CryptoRng + ?Sized,
{
    for _ in 0..MAX_DRAWS_PER_COEFFICIENT {
        rng.try_fill_bytes(&mut buf[..])
            .map_err(SharingError::EntropyUnavailable)?;
        buf[0] &= 0x01;
        if let Some(element) = FieldElement::from_canonical_bytes(&buf[..]) {
            return Ok(element);
        }
    }
    Err(SharingError::EntropyUnavailable(rand::Error::new(
        "random source kept producing values outside the field",
    )))
}
