//! Multisig state account
//!
//! Holds everything a multisig instance owns: ownership, its identity
//! (chain id and address), the signer config, the active root and op count,
//! and the metadata of the active root.

use anchor_lang::prelude::*;

use crate::crypto::EvmAddress;
use crate::error::McmsError;
use crate::state::{Config, ExpiringRootAndOpCount, RootMetadata, NUM_GROUPS};

/// Seed prefix of the multisig account
pub const MULTISIG_SEED: &[u8] = b"multisig";

/// Seed prefix of the PDA that holds funds and signs dispatched ops
pub const MULTISIG_SIGNER_SEED: &[u8] = b"multisig_signer";

/// Main multisig account.
///
/// PDA Seeds: `[b"multisig", multisig_id.as_ref()]`
#[account]
#[derive(Default)]
pub struct Multisig {
    /// Owner - can set the config and transfer ownership
    pub owner: Pubkey,

    /// Pending owner of a two-step ownership transfer
    pub proposed_owner: Pubkey,

    /// Chain id this instance accepts roots and ops for
    pub chain_id: u64,

    /// Allows multiple independent instances per program
    pub multisig_id: [u8; 32],

    /// This account's own address (cached for convenience)
    pub address: Pubkey,

    /// PDA bump seed
    pub bump: u8,

    /// Bump of the multisig signer PDA
    pub signer_bump: u8,

    pub config: Config,

    pub expiring_root_and_op_count: ExpiringRootAndOpCount,

    pub root_metadata: RootMetadata,
}

impl Multisig {
    /// Account space calculation
    pub const LEN: usize = 8 // discriminator
        + 32 // owner
        + 32 // proposed_owner
        + 8  // chain_id
        + 32 // multisig_id
        + 32 // address
        + 1  // bump
        + 1  // signer_bump
        + Config::MAX_LEN
        + ExpiringRootAndOpCount::LEN
        + RootMetadata::LEN;

    /// Initialize an instance with no config and no root
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        chain_id: u64,
        multisig_id: [u8; 32],
        address: Pubkey,
        bump: u8,
        signer_bump: u8,
    ) {
        self.owner = owner;
        self.proposed_owner = Pubkey::default();
        self.chain_id = chain_id;
        self.multisig_id = multisig_id;
        self.address = address;
        self.bump = bump;
        self.signer_bump = signer_bump;
        self.config = Config::default();
        self.expiring_root_and_op_count = ExpiringRootAndOpCount::default();
        self.root_metadata = RootMetadata::default();
    }

    /// Replace the signer config, optionally dropping the active root.
    pub fn set_config(
        &mut self,
        signer_addresses: &[EvmAddress],
        signer_groups: &[u8],
        group_quorums: [u8; NUM_GROUPS],
        group_parents: [u8; NUM_GROUPS],
        clear_root: bool,
    ) -> Result<()> {
        let config = Config::new(signer_addresses, signer_groups, group_quorums, group_parents)?;

        self.config = config;
        if clear_root {
            self.clear_root();
        }

        Ok(())
    }

    pub fn get_config(&self) -> Config {
        self.config.clone()
    }

    /// Start a two-step ownership transfer
    pub fn transfer_ownership(&mut self, proposed_owner: Pubkey) {
        self.proposed_owner = proposed_owner;
    }

    /// Complete a two-step ownership transfer, returning the previous owner
    pub fn accept_ownership(&mut self, caller: Pubkey) -> Result<Pubkey> {
        require!(
            self.proposed_owner != Pubkey::default(),
            McmsError::Unauthorized
        );
        require_keys_eq!(caller, self.proposed_owner, McmsError::Unauthorized);

        let previous_owner = self.owner;
        self.owner = caller;
        self.proposed_owner = Pubkey::default();
        Ok(previous_owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multisig_size() {
        // Must fit a full config and stay under the 10KiB init limit
        assert!(Multisig::LEN >= 8 + 32 * 4 + 8 + 2 + Config::MAX_LEN);
        assert!(Multisig::LEN <= 10 * 1024);
    }

    #[test]
    fn test_initialize_is_empty() {
        let mut multisig = Multisig::default();
        let address = Pubkey::new_unique();
        multisig.initialize(Pubkey::new_unique(), 1, [1u8; 32], address, 255, 254);

        assert!(!multisig.config.is_set());
        assert_eq!(multisig.get_op_count(), 0);
        assert_eq!(multisig.address, address);
        assert_eq!(multisig.root_metadata.post_op_count, 0);
    }

    #[test]
    fn test_ownership_two_step() {
        let owner = Pubkey::new_unique();
        let next = Pubkey::new_unique();
        let mut multisig = Multisig {
            owner,
            ..Default::default()
        };

        // nothing proposed yet
        assert!(multisig.accept_ownership(next).is_err());

        multisig.transfer_ownership(next);
        assert_eq!(multisig.owner, owner);

        // only the proposed owner can accept
        assert!(multisig.accept_ownership(Pubkey::new_unique()).is_err());

        assert_eq!(multisig.accept_ownership(next).unwrap(), owner);
        assert_eq!(multisig.owner, next);
        assert_eq!(multisig.proposed_owner, Pubkey::default());
    }

    #[test]
    fn test_failed_set_config_keeps_previous_config() {
        let mut multisig = Multisig::default();
        let mut quorums = [0u8; NUM_GROUPS];
        quorums[0] = 1;
        multisig
            .set_config(&[[1u8; 20]], &[0], quorums, [0u8; NUM_GROUPS], false)
            .unwrap();
        let before = multisig.get_config();

        quorums[0] = 5;
        assert!(multisig
            .set_config(&[[2u8; 20]], &[0], quorums, [0u8; NUM_GROUPS], true)
            .is_err());
        assert_eq!(multisig.get_config(), before);
    }
}
