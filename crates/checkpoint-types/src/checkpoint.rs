//! Checkpoint records and their signing context.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use weft_crypto::RecoverableSignature;
use weft_primitives::{Buf32, DomainId};

/// A `(root, index)` pair asserting the accumulator's state at a point in
/// time.
///
/// A checkpoint is valid for signing once its root corresponds to an
/// accumulator state with `count == index + 1`.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Deserialize, Serialize,
)]
pub struct Checkpoint {
    root: Buf32,
    index: u32,
}

impl Checkpoint {
    pub fn new(root: Buf32, index: u32) -> Self {
        Self { root, index }
    }

    pub fn root(&self) -> Buf32 {
        self.root
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// The implicit signing context of a checkpoint: which origin domain and
/// which tree instance on that domain it attests to.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Deserialize, Serialize,
)]
pub struct CheckpointContext {
    origin: DomainId,
    tree_id: Buf32,
}

impl CheckpointContext {
    pub fn new(origin: DomainId, tree_id: Buf32) -> Self {
        Self { origin, tree_id }
    }

    pub fn origin(&self) -> DomainId {
        self.origin
    }

    pub fn tree_id(&self) -> Buf32 {
        self.tree_id
    }
}

/// A checkpoint along with the validator signatures attesting to it.
///
/// Carrier type for inbound submission and for fraud evidence. Signatures
/// must be ordered by the signer's position in the validator roster.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct SignedCheckpoint {
    checkpoint: Checkpoint,
    signatures: Vec<RecoverableSignature>,
}

impl SignedCheckpoint {
    pub fn new(checkpoint: Checkpoint, signatures: Vec<RecoverableSignature>) -> Self {
        Self {
            checkpoint,
            signatures,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn signatures(&self) -> &[RecoverableSignature] {
        &self.signatures
    }
}
