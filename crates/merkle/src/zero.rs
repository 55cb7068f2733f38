//! Empty-subtree hash constants.

use std::sync::LazyLock;

use weft_primitives::{constants::TREE_DEPTH, hash, Buf32};

/// Roots of the all-zero subtree at each level.
///
/// `ZERO_HASHES[0]` is the zero leaf, `ZERO_HASHES[i + 1]` is the parent of
/// two level-`i` zero subtrees. `ZERO_HASHES[TREE_DEPTH]` is the root of an
/// empty tree.
pub static ZERO_HASHES: LazyLock<[Buf32; TREE_DEPTH + 1]> = LazyLock::new(|| {
    let mut hashes = [Buf32::zero(); TREE_DEPTH + 1];
    for i in 0..TREE_DEPTH {
        hashes[i + 1] = hash::concat(&hashes[i], &hashes[i]);
    }
    hashes
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash_chain() {
        assert!(ZERO_HASHES[0].is_zero());
        for i in 0..TREE_DEPTH {
            assert_eq!(ZERO_HASHES[i + 1], hash::concat(&ZERO_HASHES[i], &ZERO_HASHES[i]));
        }
    }
}
