//! Upload buffers for signer sets and signatures
//!
//! A full signer set or a large set of signatures does not fit in one
//! transaction. Both are uploaded in chunks into a PDA owned by the uploader,
//! finalized, and then consumed (and closed) by `set_config` / `set_root`.
//!
//! Lifecycle: `init` (announces the total) -> `append`* -> `finalize`.
//! A buffer can be closed at any point with the matching `clear` instruction.

use anchor_lang::prelude::*;

use crate::crypto::{EvmAddress, Signature};
use crate::error::McmsError;
use crate::state::MAX_NUM_SIGNERS;

/// Seed prefix of the signer upload buffer
pub const CONFIG_SIGNERS_SEED: &[u8] = b"multisig_config_signers";

/// Seed prefix of the signature upload buffer
pub const ROOT_SIGNATURES_SEED: &[u8] = b"multisig_root_signatures";

/// Signer addresses of the next config.
///
/// PDA Seeds: `[b"multisig_config_signers", multisig.key().as_ref()]`
#[account]
#[derive(Default)]
pub struct ConfigSigners {
    pub multisig: Pubkey,

    /// Addresses uploaded so far, in upload order
    pub signer_addresses: Vec<EvmAddress>,

    /// Number of addresses announced at init
    pub total_signers: u8,

    pub is_finalized: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl ConfigSigners {
    pub const LEN: usize = 8 // discriminator
        + 32 // multisig
        + 4 + MAX_NUM_SIGNERS * 20 // signer_addresses (vec)
        + 1 // total_signers
        + 1 // is_finalized
        + 1; // bump

    pub fn initialize(&mut self, multisig: Pubkey, total_signers: u8, bump: u8) -> Result<()> {
        require!(
            total_signers > 0 && total_signers as usize <= MAX_NUM_SIGNERS,
            McmsError::OutOfBoundsNumSigners
        );

        self.multisig = multisig;
        self.signer_addresses = Vec::with_capacity(total_signers as usize);
        self.total_signers = total_signers;
        self.is_finalized = false;
        self.bump = bump;
        Ok(())
    }

    /// Append a chunk of addresses. Ordering is checked when the config is
    /// built, not here.
    pub fn append(&mut self, signers_batch: &[EvmAddress]) -> Result<()> {
        require!(!self.is_finalized, McmsError::SignersAlreadyFinalized);
        require!(
            self.signer_addresses.len() + signers_batch.len() <= self.total_signers as usize,
            McmsError::OutOfBoundsNumSigners
        );

        self.signer_addresses.extend_from_slice(signers_batch);
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<()> {
        require!(!self.is_finalized, McmsError::SignersAlreadyFinalized);
        require!(
            self.signer_addresses.len() == self.total_signers as usize,
            McmsError::BufferIncomplete
        );

        self.is_finalized = true;
        Ok(())
    }
}

/// Signatures over one `(root, valid_until)`, uploaded by one submitter.
///
/// PDA Seeds: `[b"multisig_root_signatures", multisig.key().as_ref(), root.as_ref(),
/// valid_until.to_le_bytes().as_ref(), authority.key().as_ref()]`
///
/// The account starts empty and grows with every append, so its size is not
/// bounded by the account creation limit.
#[account]
#[derive(Default)]
pub struct RootSignatures {
    /// Number of signatures announced at init
    pub total_signatures: u8,

    /// Signatures uploaded so far, in upload order
    pub signatures: Vec<Signature>,

    pub is_finalized: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl RootSignatures {
    /// Account space holding `num_signatures` signatures
    pub fn space(num_signatures: usize) -> usize {
        8 // discriminator
            + 1 // total_signatures
            + 4 + Signature::LEN * num_signatures // signatures (vec)
            + 1 // is_finalized
            + 1 // bump
    }

    pub fn initialize(&mut self, total_signatures: u8, bump: u8) -> Result<()> {
        require!(
            total_signatures > 0 && total_signatures as usize <= MAX_NUM_SIGNERS,
            McmsError::OutOfBoundsNumSigners
        );

        self.total_signatures = total_signatures;
        self.signatures = Vec::new();
        self.is_finalized = false;
        self.bump = bump;
        Ok(())
    }

    pub fn append(&mut self, signatures_batch: &[Signature]) -> Result<()> {
        require!(!self.is_finalized, McmsError::SignaturesAlreadyFinalized);
        require!(
            self.signatures.len() + signatures_batch.len() <= self.total_signatures as usize,
            McmsError::OutOfBoundsNumSigners
        );

        self.signatures.extend_from_slice(signatures_batch);
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<()> {
        require!(!self.is_finalized, McmsError::SignaturesAlreadyFinalized);
        require!(
            self.signatures.len() == self.total_signatures as usize,
            McmsError::BufferIncomplete
        );

        self.is_finalized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn serialized_len<T: AnchorSerialize>(value: &T) -> usize {
        let mut out = Vec::new();
        value.serialize(&mut out).unwrap();
        out.len()
    }

    fn addresses(range: std::ops::Range<u8>) -> Vec<EvmAddress> {
        range.map(|i| [i; 20]).collect()
    }

    #[test]
    fn test_signers_upload_in_chunks() {
        let mut buffer = ConfigSigners::default();
        buffer.initialize(Pubkey::new_unique(), 200, 255).unwrap();

        for chunk in 0..5u8 {
            buffer.append(&addresses(chunk * 40..chunk * 40 + 40)).unwrap();
        }
        buffer.finalize().unwrap();

        assert!(buffer.is_finalized);
        assert_eq!(buffer.signer_addresses.len(), MAX_NUM_SIGNERS);
        assert_eq!(buffer.signer_addresses[0], [0u8; 20]);
        assert_eq!(buffer.signer_addresses[199], [199u8; 20]);
    }

    #[test]
    fn test_signers_full_buffer_fits_account() {
        let mut buffer = ConfigSigners::default();
        buffer.initialize(Pubkey::new_unique(), 200, 255).unwrap();
        buffer.append(&addresses(0..200)).unwrap();
        buffer.finalize().unwrap();

        assert_eq!(serialized_len(&buffer) + 8, ConfigSigners::LEN);
    }

    #[test]
    fn test_signers_total_bounds() {
        let mut buffer = ConfigSigners::default();
        assert_eq!(
            code(buffer.initialize(Pubkey::new_unique(), 0, 255).unwrap_err()),
            u32::from(McmsError::OutOfBoundsNumSigners)
        );
        assert_eq!(
            code(buffer.initialize(Pubkey::new_unique(), 201, 255).unwrap_err()),
            u32::from(McmsError::OutOfBoundsNumSigners)
        );

        buffer.initialize(Pubkey::new_unique(), 3, 255).unwrap();
        buffer.append(&addresses(0..2)).unwrap();
        assert_eq!(
            code(buffer.append(&addresses(2..4)).unwrap_err()),
            u32::from(McmsError::OutOfBoundsNumSigners)
        );
        assert_eq!(buffer.signer_addresses.len(), 2);
    }

    #[test]
    fn test_signers_finalize_rules() {
        let mut buffer = ConfigSigners::default();
        buffer.initialize(Pubkey::new_unique(), 3, 255).unwrap();
        buffer.append(&addresses(0..2)).unwrap();
        assert_eq!(
            code(buffer.finalize().unwrap_err()),
            u32::from(McmsError::BufferIncomplete)
        );

        buffer.append(&addresses(2..3)).unwrap();
        buffer.finalize().unwrap();
        assert_eq!(
            code(buffer.finalize().unwrap_err()),
            u32::from(McmsError::SignersAlreadyFinalized)
        );
        assert_eq!(
            code(buffer.append(&[]).unwrap_err()),
            u32::from(McmsError::SignersAlreadyFinalized)
        );
    }

    #[test]
    fn test_signatures_upload_and_finalize() {
        let mut buffer = RootSignatures::default();
        buffer.initialize(20, 254).unwrap();

        let signature = |i: u8| Signature {
            v: 27,
            r: [i; 32],
            s: [i; 32],
        };
        let first: Vec<Signature> = (0..12).map(signature).collect();
        let second: Vec<Signature> = (12..20).map(signature).collect();

        buffer.append(&first).unwrap();
        assert_eq!(
            code(buffer.finalize().unwrap_err()),
            u32::from(McmsError::BufferIncomplete)
        );
        buffer.append(&second).unwrap();
        buffer.finalize().unwrap();

        assert_eq!(buffer.signatures.len(), 20);
        assert_eq!(buffer.signatures[13], signature(13));
        assert_eq!(
            code(buffer.append(&[signature(0)]).unwrap_err()),
            u32::from(McmsError::SignaturesAlreadyFinalized)
        );
    }

    #[test]
    fn test_signatures_overflow_rejected() {
        let mut buffer = RootSignatures::default();
        buffer.initialize(1, 254).unwrap();
        assert_eq!(
            code(buffer.append(&[Signature::default(); 2]).unwrap_err()),
            u32::from(McmsError::OutOfBoundsNumSigners)
        );
        assert_eq!(
            code(RootSignatures::default().initialize(0, 254).unwrap_err()),
            u32::from(McmsError::OutOfBoundsNumSigners)
        );
    }

    #[test]
    fn test_signatures_space_tracks_length() {
        let mut buffer = RootSignatures::default();
        buffer.initialize(200, 254).unwrap();
        assert_eq!(serialized_len(&buffer) + 8, RootSignatures::space(0));

        buffer.append(&[Signature::default(); 200]).unwrap();
        assert_eq!(serialized_len(&buffer) + 8, RootSignatures::space(200));
    }
}
