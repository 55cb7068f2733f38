//! Validator identities.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use k256::{ecdsa::VerifyingKey, elliptic_curve::sec1::ToEncodedPoint};
use serde::{Deserialize, Serialize};
use weft_primitives::{hash, Buf20};

/// A 20-byte validator identity, derived from the validator's public key.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct ValidatorId(Buf20);

impl ValidatorId {
    pub const fn new(buf: Buf20) -> Self {
        Self(buf)
    }

    /// Derives the identity from a verifying key: the trailing 20 bytes of
    /// the hash of the uncompressed curve point.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let digest = hash::raw(&point.as_bytes()[1..]);
        let mut id = [0u8; 20];
        id.copy_from_slice(&digest.as_slice()[12..]);
        Self(Buf20::new(id))
    }

    pub fn inner(&self) -> &Buf20 {
        &self.0
    }
}

impl std::fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<[u8; 20]> for ValidatorId {
    fn from(data: [u8; 20]) -> Self {
        Self(Buf20::new(data))
    }
}
