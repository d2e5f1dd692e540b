//! Owner Instructions for the ManyChainMultiSig program

pub mod accept_ownership;
pub mod transfer_ownership;

pub use accept_ownership::*;
pub use transfer_ownership::*;
