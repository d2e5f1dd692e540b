//! Clear Signers Instruction
//!
//! Closes the signer buffer without using it, returning its rent to the owner.

use anchor_lang::prelude::*;

use crate::error::McmsError;
use crate::state::{ConfigSigners, Multisig, CONFIG_SIGNERS_SEED, MULTISIG_SEED};

#[derive(Accounts)]
pub struct ClearSigners<'info> {
    #[account(
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
        has_one = owner @ McmsError::Unauthorized,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    #[account(
        mut,
        seeds = [CONFIG_SIGNERS_SEED, multisig.key().as_ref()],
        bump = config_signers.bump,
        close = owner,
    )]
    pub config_signers: Box<Account<'info, ConfigSigners>>,

    #[account(mut)]
    pub owner: Signer<'info>,
}

pub fn handler(_ctx: Context<ClearSigners>) -> Result<()> {
    msg!("Signers buffer cleared");
    Ok(())
}
