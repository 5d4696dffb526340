//! Shamir secret sharing over the 257-bit prime field Zp.
//!
//! A 32-byte secret is split into `n` shares so that any `t` of them
//! recover it exactly. See [`lagrange`] for what happens when fewer than
//! `t` shares are supplied.
pub mod coefficients;
pub mod error;
pub mod field;
pub mod integrity;
pub mod lagrange;
pub mod polynomial;
pub mod selftest;
pub mod sss;

pub use error::*;
pub use field::*;
pub use integrity::*;
pub use lagrange::*;
pub use polynomial::*;
pub use sss::*;
