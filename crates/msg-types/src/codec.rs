//! Canonical-encoding traits.

use crate::errors::CodecError;

/// Types with a canonical byte encoding.
///
/// Identical field values always produce byte-identical encodings; there is
/// no padding or length-prefix ambiguity anywhere in the format.
pub trait Encode {
    /// Writes the canonical encoding, returning the number of bytes written.
    fn write_to<W>(&self, writer: &mut W) -> std::io::Result<usize>
    where
        W: std::io::Write;

    /// Serializes to a fresh buffer.
    fn to_vec(&self) -> Vec<u8> {
        let mut buf = vec![];
        self.write_to(&mut buf).expect("codec: vec write");
        buf
    }
}

/// Types decodable from their canonical byte encoding.
pub trait Decode {
    /// Reads a value from the source.
    fn read_from<R>(reader: &mut R) -> Result<Self, CodecError>
    where
        R: std::io::Read,
        Self: Sized;
}
