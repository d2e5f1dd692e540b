//! Set Config Instruction
//!
//! Replaces the signer set and group tree. Only callable by the owner.
//! Validation happens before anything is written, so a rejected config
//! leaves the previous one in place.
//!
//! Signer addresses come from the owner's finalized `ConfigSigners` buffer,
//! which is closed here.

use anchor_lang::prelude::*;

use crate::error::McmsError;
use crate::events::ConfigSet;
use crate::state::{ConfigSigners, Multisig, CONFIG_SIGNERS_SEED, MULTISIG_SEED, NUM_GROUPS};

/// Accounts for set_config instruction.
#[derive(Accounts)]
pub struct SetConfig<'info> {
    #[account(
        mut,
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
        has_one = owner @ McmsError::Unauthorized,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    #[account(
        mut,
        seeds = [CONFIG_SIGNERS_SEED, multisig.key().as_ref()],
        bump = config_signers.bump,
        constraint = config_signers.is_finalized @ McmsError::SignersNotFinalized,
        close = owner,
    )]
    pub config_signers: Box<Account<'info, ConfigSigners>>,

    #[account(mut)]
    pub owner: Signer<'info>,
}

/// Handler for set_config instruction.
///
/// # Arguments
/// * `signer_groups` - Group of each buffered signer
/// * `group_quorums` - Quorum per group, 0 disables the group
/// * `group_parents` - Parent per group, group 0 is the root
/// * `clear_root` - Also drop the active root
pub fn handler(
    ctx: Context<SetConfig>,
    signer_groups: Vec<u8>,
    group_quorums: [u8; NUM_GROUPS],
    group_parents: [u8; NUM_GROUPS],
    clear_root: bool,
) -> Result<()> {
    let signer_addresses = &ctx.accounts.config_signers.signer_addresses;
    let multisig = &mut ctx.accounts.multisig;

    multisig.set_config(
        signer_addresses,
        &signer_groups,
        group_quorums,
        group_parents,
        clear_root,
    )?;

    emit!(ConfigSet {
        multisig: multisig.key(),
        config: multisig.get_config(),
        is_root_cleared: clear_root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Config set");
    msg!("Signers: {}", signer_addresses.len());
    if clear_root {
        msg!("Root cleared");
    }

    Ok(())
}
