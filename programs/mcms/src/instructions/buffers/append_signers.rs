//! Append Signers Instruction

use anchor_lang::prelude::*;

use crate::crypto::EvmAddress;
use crate::error::McmsError;
use crate::state::{ConfigSigners, Multisig, CONFIG_SIGNERS_SEED, MULTISIG_SEED};

#[derive(Accounts)]
pub struct AppendSigners<'info> {
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

/// Handler for append_signers instruction.
///
/// # Arguments
/// * `signers_batch` - Next chunk of addresses, in config order
pub fn handler(ctx: Context<AppendSigners>, signers_batch: Vec<EvmAddress>) -> Result<()> {
    let config_signers = &mut ctx.accounts.config_signers;
    config_signers.append(&signers_batch)?;

    msg!(
        "Signers uploaded: {}/{}",
        config_signers.signer_addresses.len(),
        config_signers.total_signers
    );
    Ok(())
}
