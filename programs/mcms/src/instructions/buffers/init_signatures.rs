//! Init Signatures Instruction
//!
//! Creates a signature upload buffer for one `(root, valid_until)`. Each
//! submitter gets their own buffer, so uploads cannot interfere.

use anchor_lang::prelude::*;

use crate::state::{Multisig, RootSignatures, MULTISIG_SEED, ROOT_SIGNATURES_SEED};

#[derive(Accounts)]
#[instruction(root: [u8; 32], valid_until: u32)]
pub struct InitSignatures<'info> {
    #[account(
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    #[account(
        init,
        payer = authority,
        space = RootSignatures::space(0),
        seeds = [
            ROOT_SIGNATURES_SEED,
            multisig.key().as_ref(),
            root.as_ref(),
            valid_until.to_le_bytes().as_ref(),
            authority.key().as_ref(),
        ],
        bump
    )]
    pub root_signatures: Box<Account<'info, RootSignatures>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for init_signatures instruction.
///
/// # Arguments
/// * `root` - Root the signatures are over
/// * `valid_until` - Expiry the signatures are over
/// * `total_signatures` - Number of signatures the buffer will hold
pub fn handler(
    ctx: Context<InitSignatures>,
    _root: [u8; 32],
    _valid_until: u32,
    total_signatures: u8,
) -> Result<()> {
    ctx.accounts
        .root_signatures
        .initialize(total_signatures, ctx.bumps.root_signatures)?;

    msg!("Signatures buffer created");
    msg!("Total signatures: {}", total_signatures);
    Ok(())
}
