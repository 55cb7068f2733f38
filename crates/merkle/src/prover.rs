//! Full-tree prover for constructing inclusion proofs.
//!
//! The accumulator itself never stores leaves; proof construction is the
//! relayer's job. This keeps every observed leaf and materializes sibling
//! paths on demand.

use weft_primitives::{constants::TREE_DEPTH, hash, Buf32};

use crate::{errors::MerkleError, proof::Proof, zero::ZERO_HASHES};

/// Leaf store that can produce an inclusion proof for any inserted leaf.
#[derive(Clone, Debug, Default)]
pub struct Prover {
    leaves: Vec<Buf32>,
}

impl Prover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaves observed.
    pub fn count(&self) -> u32 {
        self.leaves.len() as u32
    }

    /// Records a dispatched leaf. Must be fed leaves in insertion order.
    pub fn ingest(&mut self, leaf: Buf32) {
        self.leaves.push(leaf);
    }

    /// Current root, equal to the accumulator root after the same
    /// insertions.
    pub fn root(&self) -> Buf32 {
        let mut level = self.leaves.clone();
        for i in 0..TREE_DEPTH {
            level = reduce(&level, i);
        }
        level.first().copied().unwrap_or(ZERO_HASHES[TREE_DEPTH])
    }

    /// Builds the sibling path for the leaf at `index`.
    pub fn prove(&self, index: u32) -> Result<Proof, MerkleError> {
        let leaf = *self
            .leaves
            .get(index as usize)
            .ok_or(MerkleError::LeafOutOfRange(index))?;

        let mut path = [Buf32::zero(); TREE_DEPTH];
        let mut level = self.leaves.clone();
        let mut idx = index as usize;
        for (i, node) in path.iter_mut().enumerate() {
            *node = level.get(idx ^ 1).copied().unwrap_or(ZERO_HASHES[i]);
            level = reduce(&level, i);
            idx >>= 1;
        }

        Ok(Proof::new(leaf, index, path))
    }
}

/// Combines one tree level into the next, padding odd tails with the
/// empty-subtree constant for that level.
fn reduce(level: &[Buf32], depth: usize) -> Vec<Buf32> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [l, r] => hash::concat(l, r),
            [l] => hash::concat(l, &ZERO_HASHES[depth]),
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}
