//! Ops authorized by a root and their in-order execution

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::AccountMeta;

use crate::crypto::{hash_op_leaf, merkle};
use crate::error::McmsError;
use crate::state::Multisig;

/// Account passed to the op's target program.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpAccount {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl OpAccount {
    pub const LEN: usize = 32 + 1 + 1;
}

impl From<&OpAccount> for AccountMeta {
    fn from(account: &OpAccount) -> Self {
        AccountMeta {
            pubkey: account.pubkey,
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        }
    }
}

/// An operation authorized by a root, stored as leaf `1 + (nonce - pre_op_count)`.
///
/// `data` is opaque: it is forwarded verbatim to `to` together with `value`
/// lamports. `remaining_accounts` is part of the leaf, so an executor cannot
/// swap the accounts the call runs against.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Op {
    pub chain_id: u64,
    pub multisig: Pubkey,
    pub nonce: u64,
    pub to: Pubkey,
    pub value: u64,
    pub data: Vec<u8>,
    pub remaining_accounts: Vec<OpAccount>,
}

impl Op {
    /// Check the accounts passed for the call against the accounts in the leaf.
    pub fn check_call_accounts(&self, passed: &[Pubkey]) -> Result<()> {
        require!(
            passed.len() == self.remaining_accounts.len(),
            McmsError::InvalidOpAccounts
        );
        for (key, account) in passed.iter().zip(&self.remaining_accounts) {
            require_keys_eq!(*key, account.pubkey, McmsError::InvalidOpAccounts);
        }
        Ok(())
    }

    /// Check that `value` can be paid out of `available` lamports.
    ///
    /// The runtime refuses lamport changes on executable accounts, so an op
    /// that calls `to` as a program cannot also send it lamports.
    pub fn check_value(&self, available: u64) -> Result<()> {
        if self.value == 0 {
            return Ok(());
        }
        require!(self.data.is_empty(), McmsError::InvalidOpValue);
        require!(available >= self.value, McmsError::CallReverted);
        Ok(())
    }
}

impl Multisig {
    /// Check that `op` is the next op of the active root and consume it.
    ///
    /// On success `op_count` is incremented; dispatching the op is left to the
    /// caller, which must abort the whole instruction if dispatch fails.
    ///
    /// # Errors
    /// `PostOpCountReached`, `RootExpired`, `WrongChainId`, `WrongMultiSig`,
    /// `WrongNonce`, `ProofCannotBeVerified`, `ArithmeticOverflow`.
    pub fn execute(&mut self, now: i64, op: &Op, proof: &[[u8; 32]]) -> Result<()> {
        let op_count = self.expiring_root_and_op_count.op_count;

        require!(
            op_count < self.root_metadata.post_op_count,
            McmsError::PostOpCountReached
        );
        require!(
            now <= i64::from(self.expiring_root_and_op_count.valid_until),
            McmsError::RootExpired
        );
        require!(op.chain_id == self.chain_id, McmsError::WrongChainId);
        require_keys_eq!(op.multisig, self.address, McmsError::WrongMultiSig);
        require!(op.nonce == op_count, McmsError::WrongNonce);

        let leaf = hash_op_leaf(op);
        require!(
            merkle::verify(&leaf, proof, &self.expiring_root_and_op_count.root),
            McmsError::ProofCannotBeVerified
        );

        self.expiring_root_and_op_count.op_count = op_count
            .checked_add(1)
            .ok_or(error!(McmsError::ArithmeticOverflow))?;

        Ok(())
    }
}
