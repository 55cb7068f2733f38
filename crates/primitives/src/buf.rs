//! Fixed-size byte buffer newtypes.

/// A 32-byte buffer, used for hash values and ledger-agnostic 32-byte
/// identifiers.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf32([u8; 32]);

impl_buf_core!(Buf32, 32);
impl_buf_fmt!(Buf32, 32);
impl_buf_borsh!(Buf32, 32);
impl_buf_arbitrary!(Buf32, 32);
impl_buf_serde!(Buf32, 32);

/// A 20-byte buffer, used for validator identities.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf20([u8; 20]);

impl_buf_core!(Buf20, 20);
impl_buf_fmt!(Buf20, 20);
impl_buf_borsh!(Buf20, 20);
impl_buf_arbitrary!(Buf20, 20);
impl_buf_serde!(Buf20, 20);
