use thiserror::Error;

/// Accumulator error types.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MerkleError {
    /// The tree holds the maximum number of leaves.
    #[error("no more space in the tree")]
    TreeFull,

    /// Asked to prove a leaf index the tree does not contain.
    #[error("leaf index {0} out of range")]
    LeafOutOfRange(u32),
}
