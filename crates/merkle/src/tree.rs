//! The incremental accumulator itself.

use borsh::{BorshDeserialize, BorshSerialize};
use weft_primitives::{
    constants::{MAX_LEAVES, TREE_DEPTH},
    hash, Buf32,
};

use crate::{errors::MerkleError, zero::ZERO_HASHES};

/// Append-only incremental Merkle tree.
///
/// Stores one hash per level, representing the rightmost partial subtrees,
/// plus the leaf count. The root is a pure function of `(count, branch)`.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct IncrementalMerkle {
    branch: [Buf32; TREE_DEPTH],
    count: u32,
}

impl Default for IncrementalMerkle {
    fn default() -> Self {
        Self {
            branch: [Buf32::zero(); TREE_DEPTH],
            count: 0,
        }
    }
}

impl IncrementalMerkle {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes an accumulator from raw parts, bypassing insertion.
    /// Test-only: reaching the capacity edge takes 2^32 - 1 inserts.
    #[cfg(test)]
    fn from_parts(branch: [Buf32; TREE_DEPTH], count: u32) -> Self {
        Self { branch, count }
    }

    /// Number of leaves inserted so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the tree has reached its leaf capacity.
    pub fn is_full(&self) -> bool {
        self.count as u64 >= MAX_LEAVES
    }

    /// Appends a leaf, carrying completed subtrees into `branch`.
    ///
    /// Amortized O(log n), O([`TREE_DEPTH`]) worst case. Errors with
    /// [`MerkleError::TreeFull`] once the leaf capacity is reached.
    pub fn ingest(&mut self, leaf: Buf32) -> Result<(), MerkleError> {
        if self.is_full() {
            return Err(MerkleError::TreeFull);
        }
        self.count += 1;

        let mut node = leaf;
        let mut size = self.count;
        for i in 0..TREE_DEPTH {
            if size & 1 == 1 {
                self.branch[i] = node;
                return Ok(());
            }
            node = hash::concat(&self.branch[i], &node);
            size >>= 1;
        }

        // `count` has at least one set bit in its low 32 bits, so the loop
        // always terminates through the store above.
        unreachable!("merkle: ingest passed tree depth")
    }

    /// Recomputes the current root from `(count, branch)` and the
    /// empty-subtree constants. Pure and idempotent.
    pub fn root(&self) -> Buf32 {
        let index = self.count;
        self.branch
            .iter()
            .enumerate()
            .fold(Buf32::zero(), |node, (i, sibling)| {
                if (index >> i) & 1 == 1 {
                    hash::concat(sibling, &node)
                } else {
                    hash::concat(&node, &ZERO_HASHES[i])
                }
            })
    }
}
