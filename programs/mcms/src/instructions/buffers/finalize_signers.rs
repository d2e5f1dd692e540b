//! Finalize Signers Instruction
//!
//! Seals the signer buffer; `set_config` only accepts a finalized buffer.

use anchor_lang::prelude::*;

use crate::error::McmsError;
use crate::state::{ConfigSigners, Multisig, CONFIG_SIGNERS_SEED, MULTISIG_SEED};

#[derive(Accounts)]
pub struct FinalizeSigners<'info> {
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
    )]
    pub config_signers: Box<Account<'info, ConfigSigners>>,

    pub owner: Signer<'info>,
}

pub fn handler(ctx: Context<FinalizeSigners>) -> Result<()> {
    ctx.accounts.config_signers.finalize()?;

    msg!("Signers buffer finalized");
    Ok(())
}
