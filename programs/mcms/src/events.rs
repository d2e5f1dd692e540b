//! Event definitions for the ManyChainMultiSig program
//!
//! Events are emitted for off-chain indexing. Tooling follows `NewRoot` and
//! `OpExecuted` to know which ops of a root are still pending.

use anchor_lang::prelude::*;

use crate::state::{Config, RootMetadata};

/// Emitted when a multisig instance is created.
#[event]
pub struct MultisigInitialized {
    pub multisig: Pubkey,
    pub owner: Pubkey,
    pub chain_id: u64,
    pub multisig_id: [u8; 32],
    /// PDA that holds funds and signs dispatched ops
    pub multisig_signer: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a new root is accepted.
#[event]
pub struct NewRoot {
    pub multisig: Pubkey,
    pub root: [u8; 32],
    pub valid_until: u32,
    pub metadata: RootMetadata,
    pub timestamp: i64,
}

/// Emitted when the owner replaces the signer config.
#[event]
pub struct ConfigSet {
    pub multisig: Pubkey,
    pub config: Config,
    /// Whether the active root was cleared along with the config
    pub is_root_cleared: bool,
    pub timestamp: i64,
}

/// Emitted for every successfully dispatched op.
#[event]
pub struct OpExecuted {
    pub multisig: Pubkey,
    pub nonce: u64,
    pub to: Pubkey,
    pub data: Vec<u8>,
    pub value: u64,
    pub timestamp: i64,
}

/// Emitted when the owner proposes a new owner.
#[event]
pub struct OwnershipTransferRequested {
    pub multisig: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the proposed owner accepts ownership.
#[event]
pub struct OwnershipTransferred {
    pub multisig: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub timestamp: i64,
}

/// Emitted when lamports are sent to the multisig signer.
#[event]
pub struct FundsReceived {
    pub multisig: Pubkey,
    pub sender: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
