use thiserror::Error;

use crate::polynomial::ShareIndex;

pub type Result<T> = std::result::Result<T, SharingError>;

/// Which split-time constraint on (threshold, share count) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterViolation {
    #[error("unmet constraint threshold: {threshold} >= 2")]
    ThresholdTooSmall { threshold: usize },
    #[error("unmet constraint shares: {share_count} >= 3")]
    TooFewShares { share_count: usize },
    #[error("unmet constraint threshold: {threshold} <= shares: {share_count}")]
    ThresholdExceedsShares { threshold: usize, share_count: usize },
    #[error("share count {share_count} does not fit a share index")]
    TooManyShares { share_count: usize },
}

#[derive(Debug, Error)]
pub enum SharingError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(ParameterViolation),
    #[error("secure randomness unavailable: {0}")]
    EntropyUnavailable(#[source] rand::Error),
    #[error("insufficient shares: got {0}, need at least 2")]
    InsufficientShares(usize),
    #[error("duplicate share index {0}")]
    DuplicateShareIndex(ShareIndex),
    #[error("inverse of zero requested")]
    DivisionByZero,
    #[error("invalid share index {0}, indices start at 1")]
    InvalidShareIndex(ShareIndex),
    #[error("secret must be exactly {expected} bytes, got {actual}")]
    InvalidSecretLength { expected: usize, actual: usize },
    #[error("malformed value for share {index}: {reason}")]
    MalformedShareValue { index: ShareIndex, reason: &'static str },
    #[error("cannot parse share: {0}")]
    UnparsableShare(&'static str),
    #[error("recovered value does not fit in {0} bytes")]
    SecretOverflow(usize),
}

impl From<ParameterViolation> for SharingError {
    fn from(violation: ParameterViolation) -> Self {
        SharingError::InvalidParameters(violation)
    }
}
