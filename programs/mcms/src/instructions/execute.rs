//! Execute Instruction
//!
//! Executes the next op of the active root. Anyone can submit it together
//! with the op's Merkle proof.
//!
//! # Dispatch
//! 1. `op.value` lamports move from the multisig signer PDA to `op.to`
//! 2. If `op.data` is non-empty, `op.to` is invoked as a program with
//!    `op.data` and `op.remaining_accounts`, signed by the multisig signer
//!
//! An op does one or the other: a program account cannot receive lamports,
//! so an op with both `value` and `data` fails with `InvalidOpValue`.
//!
//! A failure in either step aborts the whole instruction, including the
//! op count increment.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_lang::system_program::{self, Transfer};
use anchor_lang::AccountsExit;

use crate::crypto::merkle;
use crate::error::McmsError;
use crate::events::OpExecuted;
use crate::state::{Multisig, Op, MULTISIG_SEED, MULTISIG_SIGNER_SEED};

/// Accounts for execute instruction.
///
/// The accounts listed in `op.remaining_accounts` follow as remaining
/// accounts, in the same order.
#[derive(Accounts)]
#[instruction(op: Op)]
pub struct Execute<'info> {
    #[account(
        mut,
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    /// CHECK: PDA without data; source of `op.value` and signer of the call.
    #[account(
        mut,
        seeds = [MULTISIG_SIGNER_SEED, multisig.key().as_ref()],
        bump = multisig.signer_bump,
    )]
    pub multisig_signer: UncheckedAccount<'info>,

    /// CHECK: Target of the op, only its address is checked. Must be passed
    /// writable when `op.value > 0`, and must be a program when `op.data` is
    /// non-empty.
    #[account(address = op.to @ McmsError::InvalidOpAccounts)]
    pub to: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for execute instruction.
///
/// # Arguments
/// * `op` - The op, must carry the next nonce
/// * `proof` - Proof of the op leaf against the active root
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, Execute<'info>>,
    op: Op,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // ========== VERIFY AND CONSUME ==========

    ctx.accounts.multisig.execute(now, &op, &proof)?;

    // Persist the new op count before handing control to another program,
    // which may call back into this multisig.
    ctx.accounts.multisig.exit(&crate::ID)?;

    let multisig_key = ctx.accounts.multisig.key();
    let signer_bump = ctx.accounts.multisig.signer_bump;
    let leaf_index =
        merkle::op_leaf_index(op.nonce, ctx.accounts.multisig.root_metadata.pre_op_count);

    let seeds: &[&[u8]] = &[
        MULTISIG_SIGNER_SEED,
        multisig_key.as_ref(),
        &[signer_bump],
    ];
    let signer_seeds = &[seeds];

    // ========== DISPATCH ==========

    op.check_value(ctx.accounts.multisig_signer.lamports())?;

    if op.value > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.multisig_signer.to_account_info(),
            to: ctx.accounts.to.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        system_program::transfer(cpi_ctx, op.value).map_err(|_| error!(McmsError::CallReverted))?;
    }

    if !op.data.is_empty() {
        let passed: Vec<Pubkey> = ctx.remaining_accounts.iter().map(|info| info.key()).collect();
        op.check_call_accounts(&passed)?;

        let instruction = Instruction {
            program_id: op.to,
            accounts: op
                .remaining_accounts
                .iter()
                .map(AccountMeta::from)
                .collect(),
            data: op.data.clone(),
        };

        let mut account_infos = ctx.remaining_accounts.to_vec();
        account_infos.push(ctx.accounts.to.to_account_info());

        invoke_signed(&instruction, &account_infos, signer_seeds)
            .map_err(|_| error!(McmsError::CallReverted))?;

        // The call may have modified the multisig (e.g. set_config signed by
        // the multisig signer as owner).
        ctx.accounts.multisig.reload()?;
    }

    // ========== EVENT EMISSION ==========

    emit!(OpExecuted {
        multisig: multisig_key,
        nonce: op.nonce,
        to: op.to,
        data: op.data,
        value: op.value,
        timestamp: now,
    });

    msg!("Op executed");
    msg!("Nonce: {}", op.nonce);
    if let Some(index) = leaf_index {
        msg!("Leaf index: {}", index);
    }

    Ok(())
}
