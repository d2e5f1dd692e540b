//! Replay protection for signed roots using a per-pair PDA
//!
//! Every `(root, valid_until)` pair accepted by `set_root` gets its own marker
//! account. The account is created (or loaded) by `set_root` and marked on
//! success; it is never closed, so a signed root cannot be replayed after it
//! was overridden.
//!
//! # Storage Pattern
//! - O(1) lookup: the PDA is derived from the pair itself
//! - Unlimited capacity: no pre-allocated set in the multisig account

use anchor_lang::prelude::*;

/// Seed prefix for PDA derivation
pub const SEEN_SIGNED_HASH_SEED: &[u8] = b"seen_signed_hash";

/// Marker account for one signed `(root, valid_until)` pair.
///
/// PDA Seeds: `[b"seen_signed_hash", multisig.key().as_ref(), root.as_ref(), valid_until.to_le_bytes().as_ref()]`
#[account]
#[derive(Default)]
pub struct SeenSignedHash {
    /// Multisig this pair was accepted by
    pub multisig: Pubkey,

    pub root: [u8; 32],

    pub valid_until: u32,

    /// Set once the pair was accepted
    pub seen: bool,

    /// Unix timestamp of acceptance
    pub seen_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl SeenSignedHash {
    /// Account space (minimal to reduce rent costs)
    pub const LEN: usize = 8 // discriminator
        + 32                 // multisig
        + 32                 // root
        + 4                  // valid_until
        + 1                  // seen
        + 8                  // seen_at
        + 1; // bump

    /// Record the pair as accepted
    pub fn mark_seen(&mut self, multisig: Pubkey, root: [u8; 32], valid_until: u32, seen_at: i64) {
        self.multisig = multisig;
        self.root = root;
        self.valid_until = valid_until;
        self.seen = true;
        self.seen_at = seen_at;
    }

    /// Derive the PDA address for a pair
    pub fn find_pda(
        program_id: &Pubkey,
        multisig: &Pubkey,
        root: &[u8; 32],
        valid_until: u32,
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                SEEN_SIGNED_HASH_SEED,
                multisig.as_ref(),
                root.as_ref(),
                valid_until.to_le_bytes().as_ref(),
            ],
            program_id,
        )
    }
}
