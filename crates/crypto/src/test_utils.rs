//! Deterministic signer fixtures for tests.

use k256::ecdsa::SigningKey;
use weft_primitives::Buf32;

use crate::{signature::RecoverableSignature, validator::ValidatorId};

/// A deterministic test validator keyed by a small seed.
#[derive(Clone, Debug)]
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Builds a signer from a nonzero seed byte.
    pub fn from_seed(seed: u8) -> Self {
        assert_ne!(seed, 0, "test signer: seed must be nonzero");
        let mut bytes = [0u8; 32];
        bytes[31] = seed;
        let key = SigningKey::from_bytes(&bytes.into()).expect("test signer: valid scalar");
        Self { key }
    }

    /// The validator identity of this signer.
    pub fn id(&self) -> ValidatorId {
        ValidatorId::from_verifying_key(self.key.verifying_key())
    }

    /// Signs a 32-byte digest, producing the recoverable wire form.
    pub fn sign(&self, digest: &Buf32) -> RecoverableSignature {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .expect("test signer: sign digest");
        let rs: [u8; 64] = sig
            .to_bytes()
            .as_slice()
            .try_into()
            .expect("test signer: 64 byte signature");
        RecoverableSignature::from_parts(&rs, recid.to_byte())
    }
}

/// Builds `count` deterministic signers sorted into roster order
/// (ascending by validator id).
pub fn signer_roster(count: u8) -> Vec<TestSigner> {
    let mut signers: Vec<TestSigner> = (1..=count).map(TestSigner::from_seed).collect();
    signers.sort_by_key(|s| s.id());
    signers
}

/// Signs `digest` with each signer in the given order.
pub fn sign_all(signers: &[TestSigner], digest: &Buf32) -> Vec<RecoverableSignature> {
    signers.iter().map(|s| s.sign(digest)).collect()
}
