//! ManyChainMultiSig (MCMS)
//!
//! A multisig that authorizes a batch of ops with a single quorum of
//! signatures over a Merkle root. One root can carry ops for many chains and
//! multisig instances; each instance only accepts the metadata leaf and ops
//! addressed to its own `(chain_id, multisig)`.
//!
//! Flow:
//! 1. The owner uploads the signers (`init_signers`, `append_signers`,
//!    `finalize_signers`) and sets the group tree (`set_config`)
//! 2. Anyone uploads a quorum of signatures (`init_signatures`,
//!    `append_signatures`, `finalize_signatures`) and submits the root with
//!    its metadata (`set_root`)
//! 3. Anyone executes the root's ops in nonce order (`execute`)

use anchor_lang::prelude::*;

pub mod crypto;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;


use instructions::*;

use crypto::{EvmAddress, Signature};
use state::{ConfigPage, ExpiringRoot, Op, RootMetadata, NUM_GROUPS};

declare_id!("GZkWYPLxVKoxeVjfmMzrYYjDTWdPJBTq2Ygj5LrURerE");

#[program]
pub mod mcms {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, chain_id: u64, multisig_id: [u8; 32]) -> Result<()> {
        instructions::initialize::handler(ctx, chain_id, multisig_id)
    }

    pub fn set_config(
        ctx: Context<SetConfig>,
        signer_groups: Vec<u8>,
        group_quorums: [u8; NUM_GROUPS],
        group_parents: [u8; NUM_GROUPS],
        clear_root: bool,
    ) -> Result<()> {
        instructions::set_config::handler(ctx, signer_groups, group_quorums, group_parents, clear_root)
    }

    pub fn set_root(
        ctx: Context<SetRoot>,
        root: [u8; 32],
        valid_until: u32,
        metadata: RootMetadata,
        metadata_proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::set_root::handler(ctx, root, valid_until, metadata, metadata_proof)
    }

    pub fn execute<'info>(
        ctx: Context<'_, '_, '_, 'info, Execute<'info>>,
        op: Op,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::execute::handler(ctx, op, proof)
    }

    pub fn top_up(ctx: Context<TopUp>, amount: u64) -> Result<()> {
        instructions::top_up::handler(ctx, amount)
    }

    // ========== SIGNER BUFFER ==========

    pub fn init_signers(ctx: Context<InitSigners>, total_signers: u8) -> Result<()> {
        instructions::buffers::init_signers::handler(ctx, total_signers)
    }

    pub fn append_signers(ctx: Context<AppendSigners>, signers_batch: Vec<EvmAddress>) -> Result<()> {
        instructions::buffers::append_signers::handler(ctx, signers_batch)
    }

    pub fn clear_signers(ctx: Context<ClearSigners>) -> Result<()> {
        instructions::buffers::clear_signers::handler(ctx)
    }

    pub fn finalize_signers(ctx: Context<FinalizeSigners>) -> Result<()> {
        instructions::buffers::finalize_signers::handler(ctx)
    }

    // ========== SIGNATURE BUFFER ==========

    pub fn init_signatures(
        ctx: Context<InitSignatures>,
        root: [u8; 32],
        valid_until: u32,
        total_signatures: u8,
    ) -> Result<()> {
        instructions::buffers::init_signatures::handler(ctx, root, valid_until, total_signatures)
    }

    pub fn append_signatures(
        ctx: Context<AppendSignatures>,
        root: [u8; 32],
        valid_until: u32,
        signatures_batch: Vec<Signature>,
    ) -> Result<()> {
        instructions::buffers::append_signatures::handler(ctx, root, valid_until, signatures_batch)
    }

    pub fn clear_signatures(ctx: Context<ClearSignatures>, root: [u8; 32], valid_until: u32) -> Result<()> {
        instructions::buffers::clear_signatures::handler(ctx, root, valid_until)
    }

    pub fn finalize_signatures(
        ctx: Context<FinalizeSignatures>,
        root: [u8; 32],
        valid_until: u32,
    ) -> Result<()> {
        instructions::buffers::finalize_signatures::handler(ctx, root, valid_until)
    }

    // ========== OWNERSHIP ==========

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, proposed_owner: Pubkey) -> Result<()> {
        instructions::admin::transfer_ownership::handler(ctx, proposed_owner)
    }

    pub fn accept_ownership(ctx: Context<AcceptOwnership>) -> Result<()> {
        instructions::admin::accept_ownership::handler(ctx)
    }

    // ========== VIEWS ==========

    pub fn get_config(ctx: Context<View>, page: u8) -> Result<ConfigPage> {
        instructions::views::get_config(ctx, page)
    }

    pub fn get_op_count(ctx: Context<View>) -> Result<u64> {
        instructions::views::get_op_count(ctx)
    }

    pub fn get_root(ctx: Context<View>) -> Result<ExpiringRoot> {
        instructions::views::get_root(ctx)
    }

    pub fn get_root_metadata(ctx: Context<View>) -> Result<RootMetadata> {
        instructions::views::get_root_metadata(ctx)
    }

    pub fn type_and_version(ctx: Context<TypeAndVersion>) -> Result<String> {
        instructions::views::type_and_version(ctx)
    }
}
