//! Generic data types shared across the protocol crates.

#[macro_use]
mod macros;

pub mod buf;
pub mod constants;
pub mod hash;

pub use buf::{Buf20, Buf32};

/// Integer identifier for a distinct ledger participating in the protocol.
pub type DomainId = u32;

/// Per-destination message sequence number assigned at dispatch.
pub type Nonce = u32;
