//! Chunked upload of signer sets and signatures
//!
//! `set_config` reads its signer addresses from a finalized `ConfigSigners`
//! buffer and `set_root` reads its signatures from a finalized
//! `RootSignatures` buffer. Both buffers are closed when consumed.

pub mod append_signatures;
pub mod append_signers;
pub mod clear_signatures;
pub mod clear_signers;
pub mod finalize_signatures;
pub mod finalize_signers;
pub mod init_signatures;
pub mod init_signers;

pub use append_signatures::*;
pub use append_signers::*;
pub use clear_signatures::*;
pub use clear_signers::*;
pub use finalize_signatures::*;
pub use finalize_signers::*;
pub use init_signatures::*;
pub use init_signers::*;
