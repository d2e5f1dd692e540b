//! Sorted-pair keccak256 Merkle tree
//!
//! Internal nodes hash their two children in ascending byte order, so proofs
//! carry no left/right direction bits:
//!
//! ```text
//! node = keccak256(min(a, b) || max(a, b))
//! ```
//!
//! A root commits to the metadata leaf at index 0 followed by the ops of the
//! root, op with nonce `n` at index `1 + (n - pre_op_count)`.
//!
//! On-chain code only needs [`verify`]. [`MerkleTreeBuilder`] is the
//! off-chain counterpart used by tooling and tests to produce roots and
//! proofs. When a level has an odd number of nodes the last node is promoted
//! to the next level unchanged, and its proof skips that level.

use solana_program::keccak;

use crate::crypto::{hash_metadata_leaf, hash_op_leaf};
use crate::state::{Op, RootMetadata};

/// Index of the metadata leaf in every root
pub const METADATA_LEAF_INDEX: u64 = 0;

/// Hash two child nodes into their parent (children must already be ordered)
pub fn hash_internal_node(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    keccak::hashv(&[left.as_ref(), right.as_ref()]).to_bytes()
}

/// Order-independent parent of two nodes
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hash_internal_node(a, b)
    } else {
        hash_internal_node(b, a)
    }
}

/// Fold `proof` into `leaf` and compare against `root`.
pub fn verify(leaf: &[u8; 32], proof: &[[u8; 32]], root: &[u8; 32]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

/// Leaf index of the op with `nonce` in a root starting at `pre_op_count`
pub fn op_leaf_index(nonce: u64, pre_op_count: u64) -> Option<u64> {
    nonce.checked_sub(pre_op_count)?.checked_add(1)
}

/// Off-chain tree construction.
#[derive(Clone, Debug)]
pub struct MerkleTreeBuilder {
    /// `levels[0]` are the leaves, the last level holds the root
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTreeBuilder {
    /// Build a tree over precomputed leaves. Returns `None` for no leaves.
    pub fn from_leaves(leaves: Vec<[u8; 32]>) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut levels = vec![leaves];
        while let Some(level) = levels.last() {
            if level.len() == 1 {
                break;
            }
            let next: Vec<[u8; 32]> = level
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => hash_pair(&pair[0], right),
                    None => pair[0],
                })
                .collect();
            levels.push(next);
        }

        Some(Self { levels })
    }

    /// Build the tree for a root: metadata leaf first, then ops in nonce order.
    pub fn build(metadata: &RootMetadata, ops: &[Op]) -> Self {
        let mut leaves = Vec::with_capacity(1 + ops.len());
        leaves.push(hash_metadata_leaf(metadata));
        leaves.extend(ops.iter().map(hash_op_leaf));

        // at least the metadata leaf is present
        Self::from_leaves(leaves).unwrap_or(Self { levels: vec![vec![[0u8; 32]]] })
    }

    pub fn root(&self) -> [u8; 32] {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_default()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Sibling path of leaf `index`, bottom-up. `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut proof = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            if let Some(sibling) = level.get(position ^ 1) {
                proof.push(*sibling);
            }
            position /= 2;
        }
        Some(proof)
    }
}
