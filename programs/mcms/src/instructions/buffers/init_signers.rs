//! Init Signers Instruction
//!
//! Creates the owner's signer upload buffer for the next config.

use anchor_lang::prelude::*;

use crate::error::McmsError;
use crate::state::{ConfigSigners, Multisig, CONFIG_SIGNERS_SEED, MULTISIG_SEED};

#[derive(Accounts)]
pub struct InitSigners<'info> {
    #[account(
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
        has_one = owner @ McmsError::Unauthorized,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    #[account(
        init,
        payer = owner,
        space = ConfigSigners::LEN,
        seeds = [CONFIG_SIGNERS_SEED, multisig.key().as_ref()],
        bump
    )]
    pub config_signers: Box<Account<'info, ConfigSigners>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for init_signers instruction.
///
/// # Arguments
/// * `total_signers` - Number of addresses the buffer will hold
pub fn handler(ctx: Context<InitSigners>, total_signers: u8) -> Result<()> {
    let multisig = ctx.accounts.multisig.key();
    ctx.accounts
        .config_signers
        .initialize(multisig, total_signers, ctx.bumps.config_signers)?;

    msg!("Signers buffer created");
    msg!("Total signers: {}", total_signers);
    Ok(())
}
