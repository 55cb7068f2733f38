//! Cryptographic primitives: recoverable signatures, validator identities,
//! and threshold multisignature verification.

pub mod multisig;
mod signature;
mod validator;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use multisig::{verify_threshold, verify_weighted, MultisigError, ValidatorSet, WeightedValidatorSet};
pub use signature::{RecoverableSignature, SignatureError};
pub use validator::ValidatorId;
