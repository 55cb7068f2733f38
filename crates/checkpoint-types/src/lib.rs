//! Checkpoint types and the domain-separated signing digests.

mod checkpoint;
mod digest;

pub use checkpoint::{Checkpoint, CheckpointContext, SignedCheckpoint};
pub use digest::{domain_separator, merkle_root_digest, message_id_digest, DigestScheme};
