//! Hashing utilities. SHA-256 everywhere.

use sha2::{Digest, Sha256};

use crate::buf::Buf32;

/// Hashes a raw byte slice.
pub fn raw(data: &[u8]) -> Buf32 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Buf32::new(hasher.finalize().into())
}

/// Combines two tree nodes as `sha256(left || right)`.
pub fn concat(left: &Buf32, right: &Buf32) -> Buf32 {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Buf32::new(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_deterministic() {
        assert_eq!(raw(b"weft"), raw(b"weft"));
        assert_ne!(raw(b"weft"), raw(b"warp"));
    }

    #[test]
    fn test_concat_matches_manual() {
        let a = Buf32::new([1; 32]);
        let b = Buf32::new([2; 32]);
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(a.as_slice());
        buf[32..].copy_from_slice(b.as_slice());
        assert_eq!(concat(&a, &b), raw(&buf));
        assert_ne!(concat(&a, &b), concat(&b, &a));
    }
}
