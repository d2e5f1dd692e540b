//! State account definitions for the ManyChainMultiSig program

pub mod buffers;
pub mod config;
pub mod multisig;
pub mod op;
pub mod root;
pub mod seen_signed_hash;

pub use buffers::{ConfigSigners, RootSignatures, CONFIG_SIGNERS_SEED, ROOT_SIGNATURES_SEED};
pub use config::{Config, ConfigPage, GroupTally, McmSigner, MAX_NUM_SIGNERS, NUM_GROUPS, SIGNERS_PER_PAGE};
pub use multisig::{Multisig, MULTISIG_SEED, MULTISIG_SIGNER_SEED};
pub use op::{Op, OpAccount};
pub use root::{ExpiringRoot, ExpiringRootAndOpCount, RootMetadata};
pub use seen_signed_hash::{SeenSignedHash, SEEN_SIGNED_HASH_SEED};
