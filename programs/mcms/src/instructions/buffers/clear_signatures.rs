//! Clear Signatures Instruction
//!
//! Closes an unused signature buffer, returning its rent to the submitter.

use anchor_lang::prelude::*;

use crate::state::{Multisig, RootSignatures, MULTISIG_SEED, ROOT_SIGNATURES_SEED};

#[derive(Accounts)]
#[instruction(root: [u8; 32], valid_until: u32)]
pub struct ClearSignatures<'info> {
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
        close = authority,
    )]
    pub root_signatures: Box<Account<'info, RootSignatures>>,

    #[account(mut)]
    pub authority: Signer<'info>,
}

pub fn handler(_ctx: Context<ClearSignatures>, _root: [u8; 32], _valid_until: u32) -> Result<()> {
    msg!("Signatures buffer cleared");
    Ok(())
}
