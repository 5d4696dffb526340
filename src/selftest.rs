//! Round trip of a fixed sample key, used by the `test` command.
//!
//! Which shares take part in recovery is chosen with `rand::thread_rng`.
//! That choice is not security relevant; this module is the only place a
//! non-cryptographic generator is used, and it never feeds coefficients.

use rand::Rng;

use crate::error::Result;
use crate::polynomial::{ShareIndex, ShareParameters};
use crate::sss::{recover, split_secret, Secret, Share, SECRET_BYTES};

/// base64 `Qlco35ne5pbmhu5eBbFOp2yCLMdNFD/IJ9sq+ZcdoRY=`
pub const SAMPLE_KEY: [u8; SECRET_BYTES] = [
    0x42, 0x57, 0x28, 0xdf, 0x99, 0xde, 0xe6, 0x96, 0xe6, 0x86, 0xee, 0x5e, 0x05, 0xb1, 0x4e,
    0xa7, 0x6c, 0x82, 0x2c, 0xc7, 0x4d, 0x14, 0x3f, 0xc8, 0x27, 0xdb, 0x2a, 0xf9, 0x97, 0x1d,
    0xa1, 0x16,
];

pub const DEFAULT_THRESHOLD: usize = 5;
pub const DEFAULT_SHARE_COUNT: usize = 5;

#[derive(Debug)]
pub struct SelfTestReport {
    pub params: ShareParameters,
    pub shares: Vec<Share>,
    /// Indices used for recovery, in the order they were picked.
    pub used: Vec<ShareIndex>,
    pub recovered_matches: bool,
}

pub fn run(threshold: usize, share_count: usize) -> Result<SelfTestReport> {
    let params = ShareParameters::new(threshold, share_count)?;
    let secret = Secret::new(SAMPLE_KEY);
    let shares = split_secret(&secret, params)?;

    let used = pick_indices(&mut rand::thread_rng(), share_count, threshold);
    let subset: Vec<Share> = used
        .iter()
        .map(|x| shares[*x as usize - 1].clone())
        .collect();
    let recovered = recover(&subset)?;

    Ok(SelfTestReport {
        params,
        shares,
        used,
        recovered_matches: recovered == secret,
    })
}

/// `count` distinct indices from 1..=share_count, in random order.
/// Callers guarantee `count <= share_count`; `run` gets that from
/// [`ShareParameters`].
pub(crate) fn pick_indices<R: Rng + ?Sized>(rng: &mut R, share_count: usize, count: usize) -> Vec<ShareIndex> {
    rand::seq::index::sample(rng, share_count, count)
        .into_iter()
        .map(|i| i as ShareIndex + 1)
        .collect()
}
