//! Set Root Instruction
//!
//! Anyone holding a quorum of signatures over `(root, valid_until)` can
//! submit it. The `seen_signed_hash` marker for the pair is created here and
//! is what makes a signed root single use.
//!
//! Signatures come from the submitter's finalized `RootSignatures` buffer
//! for the pair, which is closed here.

use anchor_lang::prelude::*;

use crate::error::McmsError;
use crate::events::NewRoot;
use crate::state::{
    Multisig, RootMetadata, RootSignatures, SeenSignedHash, MULTISIG_SEED, ROOT_SIGNATURES_SEED,
    SEEN_SIGNED_HASH_SEED,
};

/// Accounts for set_root instruction.
#[derive(Accounts)]
#[instruction(root: [u8; 32], valid_until: u32)]
pub struct SetRoot<'info> {
    #[account(
        mut,
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    /// Replay marker for `(root, valid_until)`.
    #[account(
        init_if_needed,
        payer = authority,
        space = SeenSignedHash::LEN,
        seeds = [
            SEEN_SIGNED_HASH_SEED,
            multisig.key().as_ref(),
            root.as_ref(),
            valid_until.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub seen_signed_hash: Account<'info, SeenSignedHash>,

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
        constraint = root_signatures.is_finalized @ McmsError::SignaturesNotFinalized,
        close = authority,
    )]
    pub root_signatures: Box<Account<'info, RootSignatures>>,

    /// Submitter, pays for the marker account.
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for set_root instruction.
///
/// # Arguments
/// * `root` - Merkle root over the metadata leaf and the ops
/// * `valid_until` - Unix timestamp after which the root expires
/// * `metadata` - Leaf 0 of `root`
/// * `metadata_proof` - Proof of `metadata` against `root`
pub fn handler(
    ctx: Context<SetRoot>,
    root: [u8; 32],
    valid_until: u32,
    metadata: RootMetadata,
    metadata_proof: Vec<[u8; 32]>,
) -> Result<()> {
    let signatures = &ctx.accounts.root_signatures.signatures;
    let multisig = &mut ctx.accounts.multisig;
    let seen_signed_hash = &mut ctx.accounts.seen_signed_hash;
    let now = Clock::get()?.unix_timestamp;

    multisig.set_root(
        seen_signed_hash,
        now,
        root,
        valid_until,
        metadata,
        &metadata_proof,
        signatures,
    )?;
    seen_signed_hash.bump = ctx.bumps.seen_signed_hash;

    emit!(NewRoot {
        multisig: multisig.key(),
        root,
        valid_until,
        metadata,
        timestamp: now,
    });

    msg!("New root set");
    msg!("Root: {:?}", &root[..8]);
    msg!(
        "Ops: {}..{}",
        metadata.pre_op_count,
        metadata.post_op_count
    );

    Ok(())
}
