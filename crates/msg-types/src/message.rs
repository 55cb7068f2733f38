//! The interchain message envelope.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use weft_primitives::{hash, Buf32, DomainId, Nonce};

use crate::{
    codec::{Decode, Encode},
    errors::CodecError,
};

/// Size of the fixed-width envelope header preceding the body.
///
/// `version(1) | nonce(4) | origin(4) | sender(32) | destination(4) |
/// recipient(32)`, big-endian fixed fields; the body consumes the remainder.
pub const HEADER_BYTES: usize = 1 + 4 + 4 + 32 + 4 + 32;

/// An interchain message between ledgers.
///
/// Immutable once dispatched. Its identity hash ([`Message::id`]) is the
/// accumulator leaf and the unique key for delivery-state tracking.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Deserialize, Serialize,
)]
pub struct Message {
    /// Protocol version tag.
    pub version: u8,
    /// Per-destination sequence number assigned at dispatch.
    pub nonce: Nonce,
    /// Domain the message was dispatched from.
    pub origin: DomainId,
    /// Sender identifier in origin convention.
    pub sender: Buf32,
    /// Domain the message is addressed to.
    pub destination: DomainId,
    /// Recipient identifier in destination convention.
    pub recipient: Buf32,
    /// Opaque payload, size-bounded at dispatch.
    pub body: Vec<u8>,
}

impl Message {
    /// The identity hash of the canonical encoding.
    pub fn id(&self) -> Buf32 {
        hash::raw(&self.to_vec())
    }
}

impl Encode for Message {
    fn write_to<W>(&self, writer: &mut W) -> std::io::Result<usize>
    where
        W: std::io::Write,
    {
        writer.write_all(&[self.version])?;
        writer.write_all(&self.nonce.to_be_bytes())?;
        writer.write_all(&self.origin.to_be_bytes())?;
        writer.write_all(self.sender.as_bytes())?;
        writer.write_all(&self.destination.to_be_bytes())?;
        writer.write_all(self.recipient.as_bytes())?;
        writer.write_all(&self.body)?;
        Ok(HEADER_BYTES + self.body.len())
    }
}

impl Decode for Message {
    fn read_from<R>(reader: &mut R) -> Result<Self, CodecError>
    where
        R: std::io::Read,
    {
        let mut version = [0u8; 1];
        reader.read_exact(&mut version)?;

        let mut nonce = [0u8; 4];
        reader.read_exact(&mut nonce)?;

        let mut origin = [0u8; 4];
        reader.read_exact(&mut origin)?;

        let mut sender = [0u8; 32];
        reader.read_exact(&mut sender)?;

        let mut destination = [0u8; 4];
        reader.read_exact(&mut destination)?;

        let mut recipient = [0u8; 32];
        reader.read_exact(&mut recipient)?;

        let mut body = vec![];
        reader.read_to_end(&mut body)?;

        Ok(Self {
            version: version[0],
            nonce: Nonce::from_be_bytes(nonce),
            origin: DomainId::from_be_bytes(origin),
            sender: sender.into(),
            destination: DomainId::from_be_bytes(destination),
            recipient: recipient.into(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use weft_primitives::constants::MESSAGE_VERSION;

    use super::*;

    fn sample() -> Message {
        Message {
            version: MESSAGE_VERSION,
            nonce: 7,
            origin: 1000,
            sender: Buf32::new([0xaa; 32]),
            destination: 2000,
            recipient: Buf32::new([0xbb; 32]),
            body: b"hello across".to_vec(),
        }
    }

    #[test]
    fn test_wire_layout() {
        let msg = sample();
        let bytes = msg.to_vec();

        assert_eq!(bytes.len(), HEADER_BYTES + msg.body.len());
        assert_eq!(bytes[0], MESSAGE_VERSION);
        assert_eq!(&bytes[1..5], &7u32.to_be_bytes());
        assert_eq!(&bytes[5..9], &1000u32.to_be_bytes());
        assert_eq!(&bytes[9..41], &[0xaa; 32]);
        assert_eq!(&bytes[41..45], &2000u32.to_be_bytes());
        assert_eq!(&bytes[45..77], &[0xbb; 32]);
        assert_eq!(&bytes[77..], msg.body.as_slice());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(sample().to_vec(), sample().to_vec());
        assert_eq!(sample().id(), sample().id());
    }

    #[test]
    fn test_id_covers_every_field() {
        let base = sample();
        let mut other = sample();
        other.nonce += 1;
        assert_ne!(base.id(), other.id());

        let mut other = sample();
        other.body.push(0);
        assert_ne!(base.id(), other.id());
    }

    #[test]
    fn test_truncated_envelope_rejected() {
        let bytes = sample().to_vec();
        let err = Message::read_from(&mut &bytes[..HEADER_BYTES - 1]).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEnd));
    }

    #[test]
    fn test_empty_body_roundtrip() {
        let mut msg = sample();
        msg.body.clear();
        let back = Message::read_from(&mut msg.to_vec().as_slice()).unwrap();
        assert_eq!(back, msg);
    }

    proptest! {
        #[test]
        fn proptest_roundtrip(
            version in any::<u8>(),
            nonce in any::<u32>(),
            origin in any::<u32>(),
            sender in any::<[u8; 32]>(),
            destination in any::<u32>(),
            recipient in any::<[u8; 32]>(),
            body in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let msg = Message {
                version,
                nonce,
                origin,
                sender: sender.into(),
                destination,
                recipient: recipient.into(),
                body,
            };
            let back = Message::read_from(&mut msg.to_vec().as_slice()).unwrap();
            prop_assert_eq!(back, msg);
        }
    }
}
