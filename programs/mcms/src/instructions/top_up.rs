//! Top Up Instruction
//!
//! Sends lamports to the multisig signer PDA, the source of `op.value`.
//! Callable by anyone.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::error::McmsError;
use crate::events::FundsReceived;
use crate::state::{Multisig, MULTISIG_SEED, MULTISIG_SIGNER_SEED};

#[derive(Accounts)]
pub struct TopUp<'info> {
    #[account(
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    /// CHECK: PDA without data, receives the lamports.
    #[account(
        mut,
        seeds = [MULTISIG_SIGNER_SEED, multisig.key().as_ref()],
        bump = multisig.signer_bump,
    )]
    pub multisig_signer: UncheckedAccount<'info>,

    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<TopUp>, amount: u64) -> Result<()> {
    check_amount(amount)?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.sender.to_account_info(),
        to: ctx.accounts.multisig_signer.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.system_program.to_account_info(), cpi_accounts);
    system_program::transfer(cpi_ctx, amount)?;

    emit!(FundsReceived {
        multisig: ctx.accounts.multisig.key(),
        sender: ctx.accounts.sender.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Top up: {} lamports", amount);
    Ok(())
}

fn check_amount(amount: u64) -> Result<()> {
    require!(amount > 0, McmsError::InvalidAmount);
    Ok(())
}
