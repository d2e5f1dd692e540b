//! Read-only instructions
//!
//! Each view returns its value as program return data, which is capped at
//! 1024 bytes. `get_config` is paged for that reason: every page carries the
//! group tree and up to `SIGNERS_PER_PAGE` signers.

use anchor_lang::prelude::*;

use crate::state::{ConfigPage, ExpiringRoot, Multisig, RootMetadata, MULTISIG_SEED};

/// Identifies the contract type and its version
pub const TYPE_AND_VERSION: &str = "ManyChainMultiSig 1.0.0";

#[derive(Accounts)]
pub struct View<'info> {
    #[account(
        seeds = [MULTISIG_SEED, multisig.multisig_id.as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Box<Account<'info, Multisig>>,
}

#[derive(Accounts)]
pub struct TypeAndVersion {}

pub fn get_config(ctx: Context<View>, page: u8) -> Result<ConfigPage> {
    Ok(ctx.accounts.multisig.config.page(page))
}

pub fn get_op_count(ctx: Context<View>) -> Result<u64> {
    Ok(ctx.accounts.multisig.get_op_count())
}

pub fn get_root(ctx: Context<View>) -> Result<ExpiringRoot> {
    Ok(ctx.accounts.multisig.get_root())
}

pub fn get_root_metadata(ctx: Context<View>) -> Result<RootMetadata> {
    Ok(ctx.accounts.multisig.get_root_metadata())
}

pub fn type_and_version(_ctx: Context<TypeAndVersion>) -> Result<String> {
    Ok(TYPE_AND_VERSION.to_string())
}
