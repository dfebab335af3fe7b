//! Merkle allowlist verification.
//!
//! Leaves are `sha256(address)` over the bech32 address string. Interior
//! nodes hash the two children in ascending byte order, so a proof is just
//! the list of siblings from leaf to root with no left/right flags.

use cosmwasm_std::{Addr, HexBinary};
use sha2::{Digest, Sha256};

use crate::state::ZERO_ROOT;

pub type Digest32 = [u8; 32];

fn finish(hasher: Sha256) -> Digest32 {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn leaf_hash(addr: &Addr) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update(addr.as_str().as_bytes());
    finish(hasher)
}

pub fn hash_pair(a: &Digest32, b: &Digest32) -> Digest32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(lo);
    hasher.update(hi);
    finish(hasher)
}

/// Recompute the path from `leaf` through `proof` and compare with `root`.
///
/// Never errors: a zero root, a malformed root or sibling, and a plain
/// mismatch are all just `false`.
pub fn verify_proof(root: &HexBinary, proof: &[HexBinary], leaf: Digest32) -> bool {
    let root: Digest32 = match root.as_slice().try_into() {
        Ok(r) => r,
        Err(_) => return false,
    };
    if root == ZERO_ROOT {
        return false;
    }

    let mut computed = leaf;
    for sibling in proof {
        let sibling: Digest32 = match sibling.as_slice().try_into() {
            Ok(s) => s,
            Err(_) => return false,
        };
        computed = hash_pair(&computed, &sibling);
    }
    computed == root
}

pub fn is_allowlisted(root: &HexBinary, proof: &[HexBinary], addr: &Addr) -> bool {
    verify_proof(root, proof, leaf_hash(addr))
}
