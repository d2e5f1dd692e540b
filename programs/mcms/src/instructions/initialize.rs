//! Initialize Multisig Instruction

use anchor_lang::prelude::*;

use crate::events::MultisigInitialized;
use crate::state::{Multisig, MULTISIG_SEED, MULTISIG_SIGNER_SEED};

#[derive(Accounts)]
#[instruction(chain_id: u64, multisig_id: [u8; 32])]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = Multisig::LEN,
        seeds = [MULTISIG_SEED, multisig_id.as_ref()],
        bump
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    /// CHECK: PDA without data; holds lamports and signs dispatched ops.
    #[account(
        seeds = [MULTISIG_SIGNER_SEED, multisig.key().as_ref()],
        bump
    )]
    pub multisig_signer: UncheckedAccount<'info>,

    /// Initial owner, allowed to set the config.
    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, chain_id: u64, multisig_id: [u8; 32]) -> Result<()> {
    let multisig = &mut ctx.accounts.multisig;
    let address = multisig.key();

    multisig.initialize(
        ctx.accounts.owner.key(),
        chain_id,
        multisig_id,
        address,
        ctx.bumps.multisig,
        ctx.bumps.multisig_signer,
    );

    emit!(MultisigInitialized {
        multisig: address,
        owner: ctx.accounts.owner.key(),
        chain_id,
        multisig_id,
        multisig_signer: ctx.accounts.multisig_signer.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Multisig initialized");
    msg!("Chain id: {}", chain_id);
    Ok(())
}
