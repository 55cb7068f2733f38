//! Recoverable ECDSA signatures over secp256k1.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use thiserror::Error;
use weft_primitives::Buf32;

use crate::validator::ValidatorId;

/// Signature error types.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SignatureError {
    /// The `(r, s)` component is not a valid signature encoding.
    #[error("malformed signature encoding")]
    Malformed,

    /// The recovery byte is out of range.
    #[error("invalid recovery id {0}")]
    BadRecoveryId(u8),

    /// No public key could be recovered for the digest.
    #[error("could not recover signer")]
    Unrecoverable,
}

/// A 65-byte recoverable signature, `r || s || v`.
///
/// Validators sign the 32-byte checkpoint digest off-ledger; the signer
/// identity is recovered from the digest at verification time, so no public
/// key travels with the signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RecoverableSignature([u8; 65]);

impl RecoverableSignature {
    pub const LEN: usize = 65;

    pub const fn new(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    /// Assembles a signature from its `(r, s)` bytes and recovery byte.
    pub fn from_parts(rs: &[u8; 64], v: u8) -> Self {
        let mut buf = [0u8; 65];
        buf[..64].copy_from_slice(rs);
        buf[64] = v;
        Self(buf)
    }

    pub const fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Recovers the signer identity from the digest this signature was made
    /// over.
    pub fn recover(&self, digest: &Buf32) -> Result<ValidatorId, SignatureError> {
        let sig =
            Signature::from_slice(&self.0[..64]).map_err(|_| SignatureError::Malformed)?;
        let recid =
            RecoveryId::from_byte(self.0[64]).ok_or(SignatureError::BadRecoveryId(self.0[64]))?;
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recid)
            .map_err(|_| SignatureError::Unrecoverable)?;
        Ok(ValidatorId::from_verifying_key(&key))
    }
}

impl std::fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sig({}..)", hex::encode(&self.0[..4]))
    }
}

impl From<[u8; 65]> for RecoverableSignature {
    fn from(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }
}

impl borsh::BorshSerialize for RecoverableSignature {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.0)
    }
}

impl borsh::BorshDeserialize for RecoverableSignature {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut buf = [0u8; 65];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }
}

impl serde::Serialize for RecoverableSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> serde::Deserialize<'de> for RecoverableSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        let raw = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(raw).map_err(serde::de::Error::custom)?;
        let arr: [u8; 65] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 65 bytes"))?;
        Ok(Self(arr))
    }
}

impl<'a> arbitrary::Arbitrary<'a> for RecoverableSignature {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut buf = [0u8; 65];
        u.fill_buffer(&mut buf)?;
        Ok(Self(buf))
    }
}
