//! Protocol constants.

/// Depth of the message accumulator tree. A protocol constant, every proof
/// carries exactly this many sibling hashes.
pub const TREE_DEPTH: usize = 32;

/// Maximum number of leaves the accumulator can hold.
pub const MAX_LEAVES: u64 = (1 << TREE_DEPTH) - 1;

/// Maximum permitted message body size, checked at dispatch.
pub const MAX_MESSAGE_BODY_BYTES: usize = 2048;

/// Envelope version tag carried in every message.
pub const MESSAGE_VERSION: u8 = 1;

/// Tag mixed into every checkpoint domain separator so that signatures
/// cannot be replayed across protocols sharing the same key material.
pub const PROTOCOL_TAG: &[u8] = b"WEFT";
