use thiserror::Error;

use crate::signature::SignatureError;

/// Multisig verification error types.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MultisigError {
    /// The validator list is empty.
    #[error("validator roster cannot be empty")]
    EmptyValidators,

    /// A zero threshold can never attest to anything.
    #[error("threshold of zero")]
    NoThreshold,

    /// The threshold exceeds what the roster can provide.
    #[error("invalid threshold {threshold}: roster provides at most {available}")]
    InvalidThreshold {
        /// The threshold asked for.
        threshold: u64,
        /// What the roster can provide (member count, or total weight).
        available: u64,
    },

    /// The signature set does not establish a quorum.
    #[error("quorum threshold not met")]
    ThresholdNotMet,

    /// A signature could not be decoded or recovered.
    #[error("signature invalid: {0}")]
    Signature(#[from] SignatureError),
}
