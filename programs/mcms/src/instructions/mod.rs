//! Instruction handlers for the ManyChainMultiSig program

pub mod admin;
pub mod buffers;
pub mod execute;
pub mod initialize;
pub mod set_config;
pub mod set_root;
pub mod top_up;
pub mod views;

pub use admin::*;
pub use buffers::*;
pub use execute::*;
pub use initialize::*;
pub use set_config::*;
pub use set_root::*;
pub use top_up::*;
pub use views::*;
