//! Cryptographic primitives for the ManyChainMultiSig program
//!
//! Everything is keccak256 based so roots and signatures produced by EVM
//! tooling verify unchanged.

pub mod leaves;
pub mod merkle;
pub mod signatures;

pub use leaves::{hash_metadata_leaf, hash_op_leaf};
pub use merkle::MerkleTreeBuilder;
pub use signatures::{compute_signed_hash, recover_signer, verify_quorum, EvmAddress, Signature};
