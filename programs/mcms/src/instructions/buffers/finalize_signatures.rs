//! Finalize Signatures Instruction

use anchor_lang::prelude::*;

use crate::state::{Multisig, RootSignatures, MULTISIG_SEED, ROOT_SIGNATURES_SEED};

#[derive(Accounts)]
#[instruction(root: [u8; 32], valid_until: u32)]
pub struct FinalizeSignatures<'info> {
    #[account(
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    #[account(
        mut,
        seeds = [
            ROOT_SIGNATURES_SEED,
            multisig.key().as_ref(),
            root.as_ref(),
            valid_until.to_le_bytes().as_ref(),
            authority.key().as_ref(),
        ],
        bump = root_signatures.bump,
    )]
    pub root_signatures: Box<Account<'info, RootSignatures>>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<FinalizeSignatures>, _root: [u8; 32], _valid_until: u32) -> Result<()> {
    ctx.accounts.root_signatures.finalize()?;

    msg!("Signatures buffer finalized");
    Ok(())
}
