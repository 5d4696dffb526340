use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::coefficients::random_coefficients_with;
use crate::error::{ParameterViolation, Result};
use crate::field::FieldElement;

pub type ShareIndex = u32;

pub const MIN_THRESHOLD: usize = 2;
pub const MIN_SHARE_COUNT: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ShareParameters {
    threshold: usize,   //t
    share_count: usize, //n
}

impl ShareParameters {
    /// Checks t >= 2, n >= 3 and t <= n, in that order.
    pub fn new(threshold: usize, share_count: usize) -> Result<Self> {
        if threshold < MIN_THRESHOLD {
            return Err(ParameterViolation::ThresholdTooSmall { threshold }.into());
        }
        if share_count < MIN_SHARE_COUNT {
            return Err(ParameterViolation::TooFewShares { share_count }.into());
        }
        if threshold > share_count {
            return Err(ParameterViolation::ThresholdExceedsShares {
                threshold,
                share_count,
            }
            .into());
        }
        if share_count > ShareIndex::MAX as usize {
            return Err(ParameterViolation::TooManyShares { share_count }.into());
        }
        Ok(ShareParameters {
            threshold,
            share_count,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn share_count(&self) -> usize {
        self.share_count
    }
}

/// The evaluation of the sharing polynomial at `x`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: ShareIndex,
    pub fx: FieldElement,
}

/// Coefficients are stored highest degree first; the last one is the
/// constant term (the secret). Deliberately not `Debug`.
pub struct Polynomial {
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    pub fn from_coefficients(coefficients: Vec<FieldElement>) -> Self {
        Polynomial { coefficients }
    }

    /// A random polynomial of degree `threshold - 1` whose constant term is `secret`.
    pub fn sample<R>(secret: FieldElement, threshold: usize, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut coefficients = random_coefficients_with(rng, threshold.saturating_sub(1))?;
        coefficients.push(secret);
        Ok(Polynomial { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner's rule: y = (..((c0 * x + c1) * x + c2)..) + c_deg.
    pub fn evaluate(&self, x: &FieldElement) -> FieldElement {
        self.coefficients
            .iter()
            .fold(FieldElement::zero(), |y, c| y.mul(x).add(c))
    }

    /// Evaluates at x = 1..=n, consuming the polynomial so the coefficients
    /// do not outlive the shares.
    pub fn into_points(self, share_count: usize) -> Vec<Point> {
        (1..=share_count as ShareIndex)
            .map(|x| Point {
                x,
                fx: self.evaluate(&FieldElement::from(x)),
            })
            .collect()
    }
}
