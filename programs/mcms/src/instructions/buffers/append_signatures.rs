//! Append Signatures Instruction
//!
//! Grows the buffer by the size of the batch, paid by the submitter.

use anchor_lang::prelude::*;

use crate::crypto::Signature;
use crate::state::{Multisig, RootSignatures, MULTISIG_SEED, ROOT_SIGNATURES_SEED};

#[derive(Accounts)]
#[instruction(root: [u8; 32], valid_until: u32, signatures_batch: Vec<Signature>)]
pub struct AppendSignatures<'info> {
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
        realloc = RootSignatures::space(root_signatures.signatures.len() + signatures_batch.len()),
        realloc::payer = authority,
        realloc::zero = false,
    )]
    pub root_signatures: Box<Account<'info, RootSignatures>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for append_signatures instruction.
///
/// # Arguments
/// * `signatures_batch` - Next chunk of signatures, ordered by signer address
pub fn handler(
    ctx: Context<AppendSignatures>,
    _root: [u8; 32],
    _valid_until: u32,
    signatures_batch: Vec<Signature>,
) -> Result<()> {
    let root_signatures = &mut ctx.accounts.root_signatures;
    root_signatures.append(&signatures_batch)?;

    msg!(
        "Signatures uploaded: {}/{}",
        root_signatures.signatures.len(),
        root_signatures.total_signatures
    );
    Ok(())
}
