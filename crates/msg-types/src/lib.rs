//! Canonical message envelope and identity-hash derivation.

mod codec;
mod errors;
mod message;

pub use codec::{Decode, Encode};
pub use errors::CodecError;
pub use message::{Message, HEADER_BYTES};
