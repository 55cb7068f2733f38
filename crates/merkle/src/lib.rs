//! Append-only incremental Merkle accumulator for message commitments.
//!
//! The accumulator is a fixed-depth (32 level) hash tree where only the
//! rightmost partial subtrees are kept in memory. Insertion is append-only;
//! leaves are never removed or reordered. [`branch_root`] is the pure
//! verification primitive used by the inbound engine to check inclusion
//! proofs against any claimed root.

mod errors;
mod proof;
mod prover;
mod tree;
mod zero;

pub use errors::MerkleError;
pub use proof::{branch_root, Proof};
pub use prover::Prover;
pub use tree::IncrementalMerkle;
pub use zero::ZERO_HASHES;
