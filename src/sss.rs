use std::fmt;
use std::str::FromStr;

use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Result, SharingError};
use crate::field::{FieldElement, ELEMENT_BYTES};
use crate::lagrange::interpolate_at_zero;
use crate::polynomial::{Point, Polynomial, ShareIndex, ShareParameters};

/// Secrets are exactly 32 bytes. Any 256-bit value is below P, so a secret
/// always embeds into the field without reduction.
pub const SECRET_BYTES: usize = 32;

/// Share values are fixed-width field elements.
pub const SHARE_VALUE_BYTES: usize = ELEMENT_BYTES;

/// A 32-byte secret, wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret([u8; SECRET_BYTES]);

impl Secret {
    pub fn new(bytes: [u8; SECRET_BYTES]) -> Self {
        Secret(bytes)
    }

    /// Accepts exactly [`SECRET_BYTES`] bytes. Shorter input is not padded
    /// and longer input is not reduced.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; SECRET_BYTES] =
            bytes
                .try_into()
                .map_err(|_| SharingError::InvalidSecretLength {
                    expected: SECRET_BYTES,
                    actual: bytes.len(),
                })?;
        Ok(Secret(array))
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_BYTES] {
        &self.0
    }

    fn to_field_element(&self) -> FieldElement {
        FieldElement::from_bytes_reduced(&self.0)
    }

    fn from_field_element(element: &FieldElement) -> Result<Self> {
        let mut bytes = element
            .to_padded_bytes(SECRET_BYTES)
            .ok_or(SharingError::SecretOverflow(SECRET_BYTES))?;
        let secret = Secret::from_slice(&bytes);
        bytes.zeroize();
        secret
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// One share as handed to a holder: its index and the fixed-width
/// big-endian encoding of f(index).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Share {
    pub index: ShareIndex,
    #[serde(with = "hex::serde")]
    pub value: Vec<u8>,
}

impl Share {
    fn from_point(point: &Point) -> Self {
        Share {
            index: point.x,
            value: point.fx.to_fixed_bytes().to_vec(),
        }
    }

    /// Decodes the share, rejecting index 0 and values that are not exactly
    /// [`SHARE_VALUE_BYTES`] long or not below P.
    pub fn to_point(&self) -> Result<Point> {
        if self.index == 0 {
            return Err(SharingError::InvalidShareIndex(self.index));
        }
        if self.value.len() != SHARE_VALUE_BYTES {
            return Err(SharingError::MalformedShareValue {
                index: self.index,
                reason: "wrong length",
            });
        }
        let fx = FieldElement::from_canonical_bytes(&self.value).ok_or(
            SharingError::MalformedShareValue {
                index: self.index,
                reason: "not below the field modulus",
            },
        )?;
        Ok(Point { x: self.index, fx })
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.index, hex::encode(&self.value))
    }
}

/// Parses `<index>-<hex>` or `<index> <hex>`.
impl FromStr for Share {
    type Err = SharingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (index, value) = s
            .split_once('-')
            .or_else(|| s.split_once(char::is_whitespace))
            .ok_or(SharingError::UnparsableShare("expected <index>-<hex>"))?;
        let index: ShareIndex = index
            .trim()
            .parse()
            .map_err(|_| SharingError::UnparsableShare("index is not a number"))?;
        let value = hex::decode(value.trim()).map_err(|_| SharingError::MalformedShareValue {
            index,
            reason: "not valid hex",
        })?;
        Ok(Share { index, value })
    }
}

/// Splits a 32-byte secret into `share_count` shares, any `threshold` of
/// which recover it. Coefficients come from the OS CSPRNG.
pub fn split(secret: &[u8], threshold: usize, share_count: usize) -> Result<Vec<Share>> {
    let params = ShareParameters::new(threshold, share_count)?;
    let secret = Secret::from_slice(secret)?;
    split_secret(&secret, params)
}

pub fn split_secret(secret: &Secret, params: ShareParameters) -> Result<Vec<Share>> {
    split_with_rng(secret, params, &mut OsRng)
}

/// Shares are returned sorted by index, 1..=n. The polynomial is dropped
/// before this returns.
pub fn split_with_rng<R>(secret: &Secret, params: ShareParameters, rng: &mut R) -> Result<Vec<Share>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let polynomial = Polynomial::sample(secret.to_field_element(), params.threshold(), rng)?;
    let points = polynomial.into_points(params.share_count());
    Ok(points.iter().map(Share::from_point).collect())
}

/// Recovers the secret from at least two shares.
///
/// The result is only the secret if the shares come from one split and
/// number at least its threshold; otherwise an unrelated value comes back
/// without an error (see [`crate::lagrange`]). [`SharingError::SecretOverflow`]
/// is the one case where a mismatch is visible: the interpolated value
/// does not fit in 32 bytes.
pub fn recover(shares: &[Share]) -> Result<Secret> {
    let points = shares
        .iter()
        .map(Share::to_point)
        .collect::<Result<Vec<Point>>>()?;
    let element = interpolate_at_zero(&points)?;
    Secret::from_field_element(&element)
}
