//! Unified error types for the ManyChainMultiSig program
//!
//! The first block mirrors the closed error set of the multisig protocol and
//! keeps its order, so `code - 6000` matches the protocol error number minus 100.
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum McmsError {
    // ========== Config Errors (6000-6006) ==========

    /// Signer count is 0 or above MAX_NUM_SIGNERS
    #[msg("Number of signers must be between 1 and 200")]
    OutOfBoundsNumSigners, // 6000

    #[msg("Signer addresses and signer groups have different lengths")]
    SignerGroupsLengthMismatch, // 6001

    /// Some signer's group is >= NUM_GROUPS
    #[msg("Signer group out of bounds")]
    OutOfBoundsGroup, // 6002

    #[msg("Group tree is not well formed")]
    GroupTreeNotWellFormed, // 6003

    /// Quorum of some group is larger than the number of its members
    #[msg("Group quorum exceeds group member count")]
    OutOfBoundsGroupQuorum, // 6004

    #[msg("A disabled group contains a signer")]
    SignerInDisabledGroup, // 6005

    /// Prevents a signer from being listed (or counted) more than once
    #[msg("Signer keys must be strictly increasing")]
    SignersKeysMustBeStrictlyIncreasing, // 6006

    // ========== Signature Errors (6007-6008) ==========

    #[msg("Signature does not belong to a configured signer")]
    InvalidSigner, // 6007

    #[msg("Signatures do not satisfy the root group quorum")]
    InsufficientSigners, // 6008

    // ========== Root / Op Errors (6009-6021) ==========

    #[msg("Chain id does not match this multisig")]
    WrongChainId, // 6009

    #[msg("Multisig address does not match this multisig")]
    WrongMultiSig, // 6010

    /// preOpCount <= postOpCount violated
    #[msg("Post op count is lower than pre op count")]
    WrongPostOpCount, // 6011

    #[msg("Previous root has pending ops and override was not requested")]
    PendingOps, // 6012

    #[msg("Pre op count does not match the current op count")]
    WrongPreOpCount, // 6013

    #[msg("Merkle proof cannot be verified")]
    ProofCannotBeVerified, // 6014

    #[msg("Root has expired")]
    RootExpired, // 6015

    /// Attempt to skip or re-execute an op
    #[msg("Op nonce does not match the current op count")]
    WrongNonce, // 6016

    #[msg("All ops of the current root were already executed")]
    PostOpCountReached, // 6017

    #[msg("Op dispatch failed")]
    CallReverted, // 6018

    #[msg("Valid until has already passed")]
    ValidUntilHasAlreadyPassed, // 6019

    #[msg("Config has not been set")]
    MissingConfig, // 6020

    #[msg("Root and valid until were already seen")]
    SignedHashAlreadySeen, // 6021

    // ========== Program Errors (6022-6026) ==========

    /// Operation not authorized for caller
    #[msg("Unauthorized: caller is not the multisig owner")]
    Unauthorized, // 6022

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6023

    /// Remaining accounts passed to execute differ from the op's account list
    #[msg("Op accounts do not match the provided remaining accounts")]
    InvalidOpAccounts, // 6024

    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount, // 6025

    /// Lamports cannot be sent to a program account
    #[msg("Op carries both value and call data")]
    InvalidOpValue, // 6026

    // ========== Buffer Errors (6027-6031) ==========

    #[msg("Signers buffer is already finalized")]
    SignersAlreadyFinalized, // 6027

    #[msg("Signers buffer is not finalized")]
    SignersNotFinalized, // 6028

    #[msg("Signatures buffer is already finalized")]
    SignaturesAlreadyFinalized, // 6029

    #[msg("Signatures buffer is not finalized")]
    SignaturesNotFinalized, // 6030

    /// Buffer holds fewer entries than announced at init
    #[msg("Buffer is incomplete")]
    BufferIncomplete, // 6031
}
