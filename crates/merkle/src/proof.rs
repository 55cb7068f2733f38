//! Inclusion proofs and the pure root-recomputation primitive.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use weft_primitives::{constants::TREE_DEPTH, hash, Buf32};

/// A Merkle inclusion proof: the leaf, its position, and one sibling hash
/// per tree level.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct Proof {
    leaf: Buf32,
    index: u32,
    path: [Buf32; TREE_DEPTH],
}

impl Proof {
    pub fn new(leaf: Buf32, index: u32, path: [Buf32; TREE_DEPTH]) -> Self {
        Self { leaf, index, path }
    }

    pub fn leaf(&self) -> Buf32 {
        self.leaf
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn path(&self) -> &[Buf32; TREE_DEPTH] {
        &self.path
    }

    /// The root produced by evaluating this proof.
    pub fn root(&self) -> Buf32 {
        branch_root(&self.leaf, &self.path, self.index)
    }
}

/// Recomputes a candidate root bottom-up from a leaf, a sibling path and the
/// leaf position.
///
/// At each level the running hash is combined with the sibling in left/right
/// order determined by the corresponding bit of `index`. Pure; usable
/// against any claimed root, not only a live accumulator's.
pub fn branch_root(leaf: &Buf32, path: &[Buf32; TREE_DEPTH], index: u32) -> Buf32 {
    path.iter()
        .enumerate()
        .fold(*leaf, |node, (i, sibling)| {
            if (index >> i) & 1 == 1 {
                hash::concat(sibling, &node)
            } else {
                hash::concat(&node, sibling)
            }
        })
}
