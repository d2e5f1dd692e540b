//! Transfer Ownership Instruction
//!
//! First step of a two-step ownership transfer. The proposed owner only
//! becomes owner after calling `accept_ownership`; proposing the default
//! pubkey cancels a pending transfer.

use anchor_lang::prelude::*;

use crate::error::McmsError;
use crate::events::OwnershipTransferRequested;
use crate::state::{Multisig, MULTISIG_SEED};

/// Accounts for transfer_ownership instruction.
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account(
        mut,
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
        has_one = owner @ McmsError::Unauthorized,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    /// Current owner (must sign).
    pub owner: Signer<'info>,
}

/// Handler for transfer_ownership instruction.
///
/// # Arguments
/// * `proposed_owner` - Address that may accept ownership
pub fn handler(ctx: Context<TransferOwnership>, proposed_owner: Pubkey) -> Result<()> {
    let multisig = &mut ctx.accounts.multisig;

    multisig.transfer_ownership(proposed_owner);

    emit!(OwnershipTransferRequested {
        multisig: multisig.key(),
        from: ctx.accounts.owner.key(),
        to: proposed_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Ownership transfer requested");
    msg!("Proposed owner: {}", proposed_owner);

    Ok(())
}
