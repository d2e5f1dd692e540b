//! Root lifecycle: accepting and replacing the active signed root
//!
//! A multisig executes ops from a single root at any point in time. Each root
//! expires at `valid_until` and authorizes the op window
//! `[pre_op_count, post_op_count)` declared in its metadata leaf.

use anchor_lang::prelude::*;

use crate::crypto::{
    compute_signed_hash, hash_metadata_leaf, merkle, verify_quorum, Signature,
};
use crate::error::McmsError;
use crate::state::{Multisig, SeenSignedHash};

/// The active root, its expiry, and the global op counter.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiringRootAndOpCount {
    pub root: [u8; 32],

    /// Unix timestamp after which ops of `root` can no longer execute
    pub valid_until: u32,

    /// Number of ops executed under all roots; also the next expected nonce
    pub op_count: u64,
}

impl ExpiringRootAndOpCount {
    pub const LEN: usize = 32 + 4 + 8;
}

/// Metadata authenticated by every root as its leaf 0.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RootMetadata {
    /// `chain_id` and `multisig` scope the root to one multisig instance
    pub chain_id: u64,
    pub multisig: Pubkey,

    /// op_count before this root
    pub pre_op_count: u64,

    /// op_count after all ops of this root are executed
    pub post_op_count: u64,

    /// Replace the stored root even if some of its ops were not executed.
    /// Off-chain tooling should default this to false.
    pub override_previous_root: bool,
}

impl RootMetadata {
    pub const LEN: usize = 8 + 32 + 8 + 8 + 1;
}

/// `(root, valid_until)` as returned by the `get_root` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiringRoot {
    pub root: [u8; 32],
    pub valid_until: u32,
}

impl Multisig {
    /// Verify and store a new signed root.
    ///
    /// `seen` is the marker account of `(root, valid_until)`; it is marked on
    /// success so the same pair can never be set again. Nothing is mutated
    /// when any check fails.
    ///
    /// # Errors
    /// `MissingConfig`, `WrongChainId`, `WrongMultiSig`, `WrongPreOpCount`,
    /// `WrongPostOpCount`, `PendingOps`, `ValidUntilHasAlreadyPassed`,
    /// `SignedHashAlreadySeen`, `ProofCannotBeVerified`, and the signature
    /// errors of [`verify_quorum`].
    #[allow(clippy::too_many_arguments)]
    pub fn set_root(
        &mut self,
        seen: &mut SeenSignedHash,
        now: i64,
        root: [u8; 32],
        valid_until: u32,
        metadata: RootMetadata,
        metadata_proof: &[[u8; 32]],
        signatures: &[Signature],
    ) -> Result<()> {
        require!(self.config.is_set(), McmsError::MissingConfig);

        // ========== METADATA CHECKS ==========

        require!(metadata.chain_id == self.chain_id, McmsError::WrongChainId);
        require_keys_eq!(metadata.multisig, self.address, McmsError::WrongMultiSig);

        let op_count = self.expiring_root_and_op_count.op_count;
        require!(
            metadata.pre_op_count == op_count,
            McmsError::WrongPreOpCount
        );
        require!(
            metadata.pre_op_count <= metadata.post_op_count,
            McmsError::WrongPostOpCount
        );
        require!(
            op_count >= self.root_metadata.post_op_count || metadata.override_previous_root,
            McmsError::PendingOps
        );

        // ========== EXPIRY / REPLAY ==========

        require!(
            now <= i64::from(valid_until),
            McmsError::ValidUntilHasAlreadyPassed
        );
        require!(!seen.seen, McmsError::SignedHashAlreadySeen);

        // ========== PROOF / SIGNATURES ==========

        let metadata_leaf = hash_metadata_leaf(&metadata);
        require!(
            merkle::verify(&metadata_leaf, metadata_proof, &root),
            McmsError::ProofCannotBeVerified
        );

        let signed_hash = compute_signed_hash(&root, valid_until);
        verify_quorum(&self.config, &signed_hash, signatures)?;

        // ========== STATE UPDATE ==========

        if op_count < self.root_metadata.post_op_count {
            msg!(
                "Overriding root with {} pending ops",
                self.root_metadata.post_op_count - op_count
            );
        }

        seen.mark_seen(self.address, root, valid_until, now);
        self.expiring_root_and_op_count.root = root;
        self.expiring_root_and_op_count.valid_until = valid_until;
        self.root_metadata = metadata;

        Ok(())
    }

    /// Drop the active root, keeping `op_count`.
    ///
    /// The stored metadata declares an empty, overridable window so the next
    /// `set_root` never sees pending ops.
    pub fn clear_root(&mut self) {
        let op_count = self.expiring_root_and_op_count.op_count;
        self.expiring_root_and_op_count = ExpiringRootAndOpCount {
            root: [0u8; 32],
            valid_until: 0,
            op_count,
        };
        self.root_metadata = RootMetadata {
            chain_id: self.chain_id,
            multisig: self.address,
            pre_op_count: op_count,
            post_op_count: op_count,
            override_previous_root: true,
        };
    }

    /// Current `(root, valid_until)`.
    pub fn get_root(&self) -> ExpiringRoot {
        ExpiringRoot {
            root: self.expiring_root_and_op_count.root,
            valid_until: self.expiring_root_and_op_count.valid_until,
        }
    }

    pub fn get_op_count(&self) -> u64 {
        self.expiring_root_and_op_count.op_count
    }

    pub fn get_root_metadata(&self) -> RootMetadata {
        self.root_metadata
    }
}
