//! Lagrange interpolation at the origin.
//!
//! Given points (x_i, f(x_i)) of a polynomial f over Zp, the value f(0) is
//! `sum_i f(x_i) * l_i(0)` where
//! `l_i(0) = prod_{j != i} (0 - x_j) / prod_{j != i} (x_i - x_j)`.
//!
//! # Silent mis-recovery
//!
//! Interpolation cannot tell whether it was handed enough points. With
//! fewer points than the threshold the split used (but at least two), or
//! with points taken from different splits, the result is a well-formed
//! field element that is unrelated to the secret, and no error is raised.
//! Callers that need a signal must check the share count out of band or
//! verify the result, e.g. with [`crate::integrity::SecretDigest`].

use std::collections::HashSet;

use crate::error::{Result, SharingError};
use crate::field::FieldElement;
use crate::polynomial::Point;

/// Rejects sets with fewer than two points, an index of 0, or a repeated index.
pub fn validate_points(points: &[Point]) -> Result<()> {
    if points.len() < 2 {
        return Err(SharingError::InsufficientShares(points.len()));
    }
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if point.x == 0 {
            return Err(SharingError::InvalidShareIndex(point.x));
        }
        if !seen.insert(point.x) {
            return Err(SharingError::DuplicateShareIndex(point.x));
        }
    }
    Ok(())
}

/// The basis values l_i(0), one per point, in input order.
pub fn lagrange_basis_at_zero(points: &[Point]) -> Result<Vec<FieldElement>> {
    validate_points(points)?;

    let xs: Vec<FieldElement> = points.iter().map(|p| FieldElement::from(p.x)).collect();

    xs.iter()
        .enumerate()
        .map(|(i, xi)| -> Result<FieldElement> {
            let mut num = FieldElement::one();
            let mut den = FieldElement::one();
            for (j, xj) in xs.iter().enumerate() {
                if i != j {
                    num = num.mul(&xj.neg());
                    den = den.mul(&xi.sub(xj));
                }
            }
            if den.is_zero() {
                return Err(SharingError::DuplicateShareIndex(points[i].x));
            }
            Ok(num.mul(&den.inverse()?))
        })
        .collect()
}

/// Returns f(0) for the polynomial through `points`.
pub fn interpolate_at_zero(points: &[Point]) -> Result<FieldElement> {
    let basis = lagrange_basis_at_zero(points)?;
    Ok(basis
        .iter()
        .zip(points)
        .fold(FieldElement::zero(), |acc, (l, p)| acc.add(&l.mul(&p.fx))))
}
