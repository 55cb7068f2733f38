//! Domain-separated signing digests.
//!
//! Validators sign a 32-byte digest binding the origin domain, the tree
//! instance, the claimed root and index. Two digest variants exist; which
//! one an inbound instance accepts is fixed at configuration time.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use weft_merkle::branch_root;
use weft_primitives::{
    constants::{PROTOCOL_TAG, TREE_DEPTH},
    hash, Buf32,
};

use crate::checkpoint::{Checkpoint, CheckpointContext};

/// Which digest variant an inbound instance verifies signatures against.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Deserialize, Serialize,
)]
pub enum DigestScheme {
    /// Validators sign the raw accumulator root.
    MessageId,
    /// Validators sign a root recomputed from an inclusion proof of a
    /// specific message, binding that message's id into the digest.
    MerkleRoot,
}

/// The domain separator binding a digest to one origin and tree instance.
pub fn domain_separator(ctx: &CheckpointContext) -> Buf32 {
    let mut buf = Vec::with_capacity(4 + 32 + PROTOCOL_TAG.len());
    buf.extend_from_slice(&ctx.origin().to_be_bytes());
    buf.extend_from_slice(ctx.tree_id().as_bytes());
    buf.extend_from_slice(PROTOCOL_TAG);
    hash::raw(&buf)
}

/// Signing digest over a raw accumulator checkpoint.
pub fn message_id_digest(ctx: &CheckpointContext, checkpoint: &Checkpoint) -> Buf32 {
    let sep = domain_separator(ctx);
    let mut buf = Vec::with_capacity(32 + 32 + 4);
    buf.extend_from_slice(sep.as_bytes());
    buf.extend_from_slice(checkpoint.root().as_bytes());
    buf.extend_from_slice(&checkpoint.index().to_be_bytes());
    hash::raw(&buf)
}

/// Signing digest over a root recomputed from an inclusion proof of the
/// message at `message_index`, bound to the checkpoint signed at
/// `signed_index`.
///
/// The two indices are distinct: the proof opens a leaf position, while
/// the quorum attests a (usually later) checkpoint whose root commits that
/// leaf. Because any accumulator root implies inclusion of all earlier
/// leaves, a validator's signature on a later checkpoint retroactively
/// proves inclusion of any earlier message. A validator cannot refuse to
/// attest an old message while continuing to sign newer checkpoints.
pub fn merkle_root_digest(
    ctx: &CheckpointContext,
    message_id: Buf32,
    path: &[Buf32; TREE_DEPTH],
    message_index: u32,
    signed_index: u32,
) -> Buf32 {
    let root = branch_root(&message_id, path, message_index);
    let sep = domain_separator(ctx);
    let mut buf = Vec::with_capacity(32 + 32 + 4 + 32);
    buf.extend_from_slice(sep.as_bytes());
    buf.extend_from_slice(root.as_bytes());
    buf.extend_from_slice(&signed_index.to_be_bytes());
    buf.extend_from_slice(message_id.as_bytes());
    hash::raw(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CheckpointContext {
        CheckpointContext::new(1000, Buf32::new([0x11; 32]))
    }

    #[test]
    fn test_domain_separation() {
        let base = domain_separator(&ctx());
        let other_origin = domain_separator(&CheckpointContext::new(1001, Buf32::new([0x11; 32])));
        let other_tree = domain_separator(&CheckpointContext::new(1000, Buf32::new([0x22; 32])));
        assert_ne!(base, other_origin);
        assert_ne!(base, other_tree);
    }

    #[test]
    fn test_digest_binds_root_and_index() {
        let cp = Checkpoint::new(Buf32::new([0xcc; 32]), 4);
        let base = message_id_digest(&ctx(), &cp);
        assert_ne!(
            base,
            message_id_digest(&ctx(), &Checkpoint::new(Buf32::new([0xcd; 32]), 4))
        );
        assert_ne!(
            base,
            message_id_digest(&ctx(), &Checkpoint::new(Buf32::new([0xcc; 32]), 5))
        );
    }

    #[test]
    fn test_message_id_digest_stability() {
        // Pinned values; a change here breaks every signature in the wild.
        let sep = domain_separator(&ctx());
        assert_eq!(
            format!("{sep:?}"),
            "1cd13f717c376ce00704e31364183e91d3e9aad82befd678462a0eef3fdf2e28"
        );
        let digest = message_id_digest(&ctx(), &Checkpoint::new(Buf32::new([0xcc; 32]), 4));
        assert_eq!(
            format!("{digest:?}"),
            "7394abfa12b814e880588fd59d3f9c8db0140c21f94e60afd74360ffa08374ac"
        );
    }

    #[test]
    fn test_variants_diverge() {
        // Even over equal (root, index) material the two variants must not
        // produce colliding digests, since the merkle-root variant appends
        // the message id.
        let path = [Buf32::zero(); TREE_DEPTH];
        let id = Buf32::new([0xee; 32]);
        let root = branch_root(&id, &path, 3);
        let mid = message_id_digest(&ctx(), &Checkpoint::new(root, 3));
        let mrk = merkle_root_digest(&ctx(), id, &path, 3, 3);
        assert_ne!(mid, mrk);
    }

    #[test]
    fn test_signed_index_bound_independently() {
        // The signed checkpoint index enters the digest separately from the
        // proof position, so signing checkpoint 6 through a proof of leaf 2
        // differs from signing checkpoint 5 through the same proof.
        let path = [Buf32::zero(); TREE_DEPTH];
        let id = Buf32::new([0xee; 32]);
        let base = merkle_root_digest(&ctx(), id, &path, 2, 5);
        assert_ne!(base, merkle_root_digest(&ctx(), id, &path, 2, 6));
        assert_ne!(base, merkle_root_digest(&ctx(), id, &path, 3, 5));
    }
}
