//! Optional post-recovery check.
//!
//! Recovery cannot detect a wrong share count or shares mixed from two
//! splits. A [`SecretDigest`] stored next to the shares lets a caller check
//! the recovered secret afterwards. It is a salted hash, not a MAC over the
//! shares, and plays no part in `split` or `recover`.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, SharingError};
use crate::sss::Secret;

const DOMAIN_TAG: &[u8] = b"shamir-p257/secret-digest/v1";

pub const SALT_BYTES: usize = 16;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SecretDigest {
    #[serde(with = "hex::serde")]
    salt: Vec<u8>,
    #[serde(with = "hex::serde")]
    digest: Vec<u8>,
}

impl SecretDigest {
    pub fn commit(secret: &Secret) -> Result<Self> {
        Self::commit_with_rng(secret, &mut OsRng)
    }

    pub fn commit_with_rng<R>(secret: &Secret, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut salt = vec![0u8; SALT_BYTES];
        rng.try_fill_bytes(&mut salt)
            .map_err(SharingError::EntropyUnavailable)?;
        let digest = hash(&salt, secret);
        Ok(SecretDigest { salt, digest })
    }

    pub fn verify(&self, secret: &Secret) -> bool {
        hash(&self.salt, secret) == self.digest
    }
}

// H(tag || salt || secret)
fn hash(salt: &[u8], secret: &Secret) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN_TAG);
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hasher.finalize().to_vec()
}
