//! Accept Ownership Instruction
//!
//! Second step of a two-step ownership transfer. Only callable by the
//! proposed owner.

use anchor_lang::prelude::*;

use crate::events::OwnershipTransferred;
use crate::state::{Multisig, MULTISIG_SEED};

/// Accounts for accept_ownership instruction.
#[derive(Accounts)]
pub struct AcceptOwnership<'info> {
    #[account(
        mut,
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    /// Proposed owner (must sign).
    pub new_owner: Signer<'info>,
}

pub fn handler(ctx: Context<AcceptOwnership>) -> Result<()> {
    let multisig = &mut ctx.accounts.multisig;
    let new_owner = ctx.accounts.new_owner.key();

    let previous_owner = multisig.accept_ownership(new_owner)?;

    emit!(OwnershipTransferred {
        multisig: multisig.key(),
        from: previous_owner,
        to: new_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Ownership transferred");
    msg!("Old owner: {}", previous_owner);
    msg!("New owner: {}", new_owner);

    Ok(())
}
