//! Signer recovery and quorum verification
//!
//! Signers sign the Ethereum personal-message hash of `(root, valid_until)`:
//!
//! ```text
//! signed_hash = keccak256("\x19Ethereum Signed Message:\n32"
//!                         || keccak256(root || uint256_be(valid_until)))
//! ```
//!
//! A signer is identified by its EVM address, the last 20 bytes of the
//! keccak256 hash of its uncompressed public key (without the 0x04 prefix).
//! The public key is recovered on-chain through the secp256k1 recover syscall.

use anchor_lang::prelude::*;
use solana_program::keccak;
use solana_program::secp256k1_recover::secp256k1_recover;

use crate::error::McmsError;
use crate::state::{Config, GroupTally};

/// 20-byte Ethereum-style signer address
pub type EvmAddress = [u8; 20];

/// Personal-message prefix for a 32-byte payload
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Recoverable secp256k1 signature.
///
/// `v` is the recovery id, accepted both as 27/28 and as 0/1.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Signature {
    pub const LEN: usize = 1 + 32 + 32;

    fn recovery_id(&self) -> Option<u8> {
        match self.v {
            0 | 1 => Some(self.v),
            27 | 28 => Some(self.v - 27),
            _ => None,
        }
    }

    fn to_rs_bytes(self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }
}

/// Hash the signers actually sign for a root.
pub fn compute_signed_hash(root: &[u8; 32], valid_until: u32) -> [u8; 32] {
    let mut valid_until_word = [0u8; 32];
    valid_until_word[28..].copy_from_slice(&valid_until.to_be_bytes());

    let inner = keccak::hashv(&[root.as_ref(), valid_until_word.as_ref()]);
    keccak::hashv(&[ETH_SIGNED_MESSAGE_PREFIX, inner.as_ref()]).to_bytes()
}

/// EVM address of an uncompressed public key (x || y)
pub fn evm_address(public_key: &[u8; 64]) -> EvmAddress {
    let hash = keccak::hash(public_key).to_bytes();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the signer address, `None` for malformed signatures.
pub fn recover_signer(signed_hash: &[u8; 32], signature: &Signature) -> Option<EvmAddress> {
    let recovery_id = signature.recovery_id()?;
    let public_key =
        secp256k1_recover(signed_hash, recovery_id, &signature.to_rs_bytes()).ok()?;
    Some(evm_address(&public_key.to_bytes()))
}

/// Check that `signatures` satisfy the quorum of group 0.
///
/// Signatures must recover to configured signers in strictly increasing
/// address order, which also rules out counting a signer twice.
///
/// # Errors
/// * `InvalidSigner` - malformed signature or unknown signer
/// * `SignersKeysMustBeStrictlyIncreasing` - unsorted or duplicate signer
/// * `InsufficientSigners` - group 0 did not reach its quorum
pub fn verify_quorum(
    config: &Config,
    signed_hash: &[u8; 32],
    signatures: &[Signature],
) -> Result<()> {
    let mut tally = GroupTally::default();
    let mut previous: Option<EvmAddress> = None;

    for signature in signatures {
        let address =
            recover_signer(signed_hash, signature).ok_or(error!(McmsError::InvalidSigner))?;
        let signer = config
            .signer(&address)
            .ok_or(error!(McmsError::InvalidSigner))?;

        if let Some(previous) = previous {
            require!(
                previous < address,
                McmsError::SignersKeysMustBeStrictlyIncreasing
            );
        }
        previous = Some(address);

        tally.record(config, signer.group);
    }

    require!(
        tally.is_root_successful(config),
        McmsError::InsufficientSigners
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_id_forms() {
        let mut sig = Signature::default();
        for (v, expected) in [(0, Some(0)), (1, Some(1)), (27, Some(0)), (28, Some(1)), (2, None), (29, None)] {
            sig.v = v;
            assert_eq!(sig.recovery_id(), expected);
        }
    }

    #[test]
    fn test_signed_hash_binds_valid_until() {
        let root = [9u8; 32];
        assert_ne!(compute_signed_hash(&root, 1), compute_signed_hash(&root, 2));
        assert_ne!(
            compute_signed_hash(&root, 1),
            compute_signed_hash(&[8u8; 32], 1)
        );
    }

    #[test]
    fn test_signed_hash_layout() {
        let root = [3u8; 32];
        let mut preimage = root.to_vec();
        preimage.extend_from_slice(&[0u8; 28]);
        preimage.extend_from_slice(&0x0102_0304u32.to_be_bytes());
        let inner = keccak::hash(&preimage).to_bytes();

        let mut outer = ETH_SIGNED_MESSAGE_PREFIX.to_vec();
        outer.extend_from_slice(&inner);
        assert_eq!(
            compute_signed_hash(&root, 0x0102_0304),
            keccak::hash(&outer).to_bytes()
        );
    }

    #[test]
    fn test_garbage_signature_is_rejected() {
        let sig = Signature { v: 27, r: [0u8; 32], s: [0u8; 32] };
        assert!(recover_signer(&[1u8; 32], &sig).is_none());

        let sig = Signature { v: 5, r: [1u8; 32], s: [1u8; 32] };
        assert!(recover_signer(&[1u8; 32], &sig).is_none());
    }
}
