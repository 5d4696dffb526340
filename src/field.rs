//! Arithmetic over the prime field Zp used for secret sharing.
//!
//! P is the 257-bit prime
//! 208351617316091241234326746312124448251235562226470491514186331217050270460481,
//! i.e. 312^2 + 312^3 + 312^5 + 312^7 + 312^11 + 312^13 + 312^17 + 312^19
//! + 312^23 + 312^29 + 312^31 + 1. Every 256-bit value is below P, so a
//! 32-byte secret embeds into the field without reduction.

use std::ops::{Add, Mul, Sub};

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{Result, SharingError};

/// Width of a field element on the wire: ceil(257 / 8).
pub const ELEMENT_BYTES: usize = 33;

/// Big-endian bytes of P.
pub const MODULUS_BYTES: [u8; ELEMENT_BYTES] = [
    0x01, 0xcc, 0xa2, 0xd6, 0x1c, 0x8b, 0x90, 0x93, 0xf4, 0x73, 0xc1, 0xfa, 0x8e, 0x3c, 0x7c,
    0x65, 0x4a, 0x8a, 0x66, 0xb1, 0x62, 0x6d, 0xa7, 0x8d, 0x23, 0x42, 0x92, 0x11, 0x7d, 0xd7,
    0xd4, 0x6a, 0x41,
];

lazy_static! {
    static ref MODULUS: BigUint = BigUint::from_bytes_be(&MODULUS_BYTES);
    static ref MODULUS_MINUS_TWO: BigUint = &*MODULUS - 2u32;
}

pub fn modulus() -> &'static BigUint {
    &MODULUS
}

/// An integer in [0, P). Every constructor reduces or rejects, so the
/// invariant holds for every value handed out.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    /// Interprets `bytes` as a big-endian unsigned integer and reduces it mod P.
    pub fn from_bytes_reduced(bytes: &[u8]) -> Self {
        FieldElement(BigUint::from_bytes_be(bytes) % modulus())
    }

    /// Strict decoding: `bytes` must be big-endian and already below P.
    /// Returns `None` for values >= P; nothing is silently reduced.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Option<Self> {
        let value = BigUint::from_bytes_be(bytes);
        if &value < modulus() {
            Some(FieldElement(value))
        } else {
            None
        }
    }

    /// Fixed-width encoding, left-zero-padded to [`ELEMENT_BYTES`].
    pub fn to_fixed_bytes(&self) -> [u8; ELEMENT_BYTES] {
        let mut out = [0u8; ELEMENT_BYTES];
        let raw = self.0.to_bytes_be();
        out[ELEMENT_BYTES - raw.len()..].copy_from_slice(&raw);
        out
    }

    /// Encodes into exactly `width` bytes, or `None` if the value needs more.
    pub fn to_padded_bytes(&self, width: usize) -> Option<Vec<u8>> {
        if self.0.bits() > (width as u64) * 8 {
            return None;
        }
        let raw = self.0.to_bytes_be();
        let mut out = vec![0u8; width];
        out[width - raw.len()..].copy_from_slice(&raw);
        Some(out)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn add(&self, other: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + &other.0) % modulus())
    }

    /// Wraps through P when `other > self`; never goes negative.
    pub fn sub(&self, other: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + modulus() - &other.0) % modulus())
    }

    pub fn mul(&self, other: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &other.0) % modulus())
    }

    pub fn neg(&self) -> FieldElement {
        FieldElement::zero().sub(self)
    }

    /// a^(P-2) mod P, valid because P is prime.
    pub fn inverse(&self) -> Result<FieldElement> {
        if self.is_zero() {
            return Err(SharingError::DivisionByZero);
        }
        Ok(FieldElement(self.0.modpow(&MODULUS_MINUS_TWO, modulus())))
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        FieldElement(BigUint::from(value) % modulus())
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        FieldElement::from(value as u64)
    }
}

impl<'a> Add<&'a FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &'a FieldElement) -> FieldElement {
        FieldElement::add(self, rhs)
    }
}

impl<'a> Sub<&'a FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &'a FieldElement) -> FieldElement {
        FieldElement::sub(self, rhs)
    }
}

impl<'a> Mul<&'a FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &'a FieldElement) -> FieldElement {
        FieldElement::mul(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p_minus(k: u32) -> FieldElement {
        FieldElement(modulus() - k)
    }

    #[test]
    fn modulus_matches_factorization() {
        let base = BigUint::from(312u32);
        let p = [2u32, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31]
            .iter()
            .fold(BigUint::one(), |acc, e| acc + base.pow(*e));
        assert_eq!(&p, modulus());
        assert_eq!(modulus().bits(), 257);
        assert_eq!(
            modulus().to_str_radix(10),
            "208351617316091241234326746312124448251235562226470491514186331217050270460481"
        );
    }

    #[test]
    fn modulus_passes_fermat_checks() {
        let p = modulus();
        let p_minus_one = p - 1u32;
        for base in [2u32, 3, 5, 7, 11] {
            assert!(BigUint::from(base).modpow(&p_minus_one, p).is_one());
        }
    }

    #[test]
    fn every_256_bit_value_is_below_p() {
        let max = FieldElement::from_canonical_bytes(&[0xff; 32]);
        assert!(max.is_some());
    }

    #[test]
    fn add_wraps() {
        let a = p_minus(1);
        let b = FieldElement::from(5u64);
        assert_eq!(a.add(&b), FieldElement::from(4u64));
    }

    #[test]
    fn sub_normalizes_when_smaller() {
        let a = FieldElement::from(3u64);
        let b = FieldElement::from(10u64);
        assert_eq!(&a - &b, p_minus(7));
        assert_eq!(&b - &a, FieldElement::from(7u64));
    }

    #[test]
    fn mul_reduces() {
        let a = p_minus(1);
        // (-1) * (-1) = 1
        assert_eq!(&a * &a, FieldElement::one());
    }

    #[test]
    fn inverse_roundtrips() {
        for v in [1u64, 2, 3, 312, 1 << 40] {
            let a = FieldElement::from(v);
            let inv = a.inverse().unwrap();
            assert_eq!(a.mul(&inv), FieldElement::one());
        }
        let a = p_minus(2);
        assert_eq!(a.mul(&a.inverse().unwrap()), FieldElement::one());
    }

    #[test]
    fn inverse_of_zero_fails() {
        assert!(matches!(
            FieldElement::zero().inverse(),
            Err(SharingError::DivisionByZero)
        ));
    }

    #[test]
    fn canonical_decoding_rejects_modulus() {
        assert!(FieldElement::from_canonical_bytes(&MODULUS_BYTES).is_none());
        assert_eq!(FieldElement::from_bytes_reduced(&MODULUS_BYTES), FieldElement::zero());
    }

    #[test]
    fn fixed_width_encoding_keeps_leading_zeros() {
        let one = FieldElement::one().to_fixed_bytes();
        assert_eq!(one.len(), ELEMENT_BYTES);
        assert_eq!(one[ELEMENT_BYTES - 1], 1);
        assert!(one[..ELEMENT_BYTES - 1].iter().all(|b| *b == 0));
        assert_eq!(FieldElement::zero().to_fixed_bytes(), [0u8; ELEMENT_BYTES]);

        let top = p_minus(1).to_fixed_bytes();
        assert_eq!(FieldElement::from_canonical_bytes(&top), Some(p_minus(1)));
    }

    #[test]
    fn padded_encoding_rejects_wide_values() {
        assert_eq!(FieldElement::one().to_padded_bytes(32).unwrap().len(), 32);
        assert!(p_minus(1).to_padded_bytes(32).is_none());
        assert_eq!(FieldElement::zero().to_padded_bytes(32), Some(vec![0u8; 32]));
    }
}
