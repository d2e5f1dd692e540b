//! Domain-separated leaf hashing
//!
//! Every leaf pre-image starts with a 32-byte domain separator naming the leaf
//! type, followed by the leaf fields:
//!
//! ```text
//! metadata leaf = keccak256(DOMAIN_SEPARATOR_METADATA || chain_id || multisig
//!                           || pre_op_count || post_op_count || override_previous_root)
//! op leaf       = keccak256(DOMAIN_SEPARATOR_OP || chain_id || multisig || nonce || to
//!                           || value || len(data) || data
//!                           || len(accounts) || (pubkey || is_signer || is_writable)*)
//! ```
//!
//! Integers are big-endian, lengths are u64. The shortest possible pre-images
//! are 89 bytes (metadata) and 136 bytes (op), so no leaf pre-image can have
//! the 64-byte shape of an internal node.

use solana_program::keccak;

use crate::state::{Op, RootMetadata};

/// keccak256("MANY_CHAIN_MULTI_SIG_DOMAIN_SEPARATOR_OP")
pub const DOMAIN_SEPARATOR_OP: [u8; 32] = [
    0x08, 0xd2, 0x75, 0x62, 0x20, 0x06, 0xc4, 0xca,
    0x82, 0xd0, 0x3f, 0x49, 0x8e, 0x90, 0x16, 0x3c,
    0xaf, 0xd5, 0x3c, 0x66, 0x3a, 0x48, 0x47, 0x0c,
    0x3b, 0x52, 0xac, 0x8b, 0xfb, 0xd9, 0xf5, 0x2c,
];

/// keccak256("MANY_CHAIN_MULTI_SIG_DOMAIN_SEPARATOR_METADATA")
pub const DOMAIN_SEPARATOR_METADATA: [u8; 32] = [
    0xe6, 0xb8, 0x2b, 0xe9, 0x89, 0x10, 0x1b, 0x4e,
    0xb5, 0x19, 0x77, 0x01, 0x14, 0xb9, 0x97, 0xb9,
    0x7b, 0x3c, 0x87, 0x07, 0x51, 0x52, 0x86, 0x74,
    0x8a, 0x87, 0x17, 0x17, 0xf0, 0xe4, 0xea, 0x1c,
];

/// Pre-image size of an internal Merkle node (two child hashes)
pub const INTERNAL_NODE_PREIMAGE_LEN: usize = 64;

/// Pre-image of the metadata leaf.
pub fn metadata_preimage(metadata: &RootMetadata) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + RootMetadata::LEN);
    out.extend_from_slice(&DOMAIN_SEPARATOR_METADATA);
    out.extend_from_slice(&metadata.chain_id.to_be_bytes());
    out.extend_from_slice(metadata.multisig.as_ref());
    out.extend_from_slice(&metadata.pre_op_count.to_be_bytes());
    out.extend_from_slice(&metadata.post_op_count.to_be_bytes());
    out.push(metadata.override_previous_root as u8);
    out
}

/// Pre-image of an op leaf.
pub fn op_preimage(op: &Op) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        32 + 8 + 32 + 8 + 32 + 8 + 8 + op.data.len() + 8 + op.remaining_accounts.len() * 34,
    );
    out.extend_from_slice(&DOMAIN_SEPARATOR_OP);
    out.extend_from_slice(&op.chain_id.to_be_bytes());
    out.extend_from_slice(op.multisig.as_ref());
    out.extend_from_slice(&op.nonce.to_be_bytes());
    out.extend_from_slice(op.to.as_ref());
    out.extend_from_slice(&op.value.to_be_bytes());
    out.extend_from_slice(&(op.data.len() as u64).to_be_bytes());
    out.extend_from_slice(&op.data);
    out.extend_from_slice(&(op.remaining_accounts.len() as u64).to_be_bytes());
    for account in &op.remaining_accounts {
        out.extend_from_slice(account.pubkey.as_ref());
        out.push(account.is_signer as u8);
        out.push(account.is_writable as u8);
    }
    out
}

/// Leaf 0 of every root.
pub fn hash_metadata_leaf(metadata: &RootMetadata) -> [u8; 32] {
    keccak::hash(&metadata_preimage(metadata)).to_bytes()
}

pub fn hash_op_leaf(op: &Op) -> [u8; 32] {
    keccak::hash(&op_preimage(op)).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OpAccount;
    use anchor_lang::prelude::Pubkey;
    use proptest::prelude::*;

    fn arb_pubkey() -> impl Strategy<Value = Pubkey> {
        any::<[u8; 32]>().prop_map(Pubkey::new_from_array)
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        (
            any::<u64>(),
            arb_pubkey(),
            any::<u64>(),
            arb_pubkey(),
            any::<u64>(),
            proptest::collection::vec(any::<u8>(), 0..96),
            proptest::collection::vec((arb_pubkey(), any::<bool>(), any::<bool>()), 0..4),
        )
            .prop_map(|(chain_id, multisig, nonce, to, value, data, accounts)| Op {
                chain_id,
                multisig,
                nonce,
                to,
                value,
                data,
                remaining_accounts: accounts
                    .into_iter()
                    .map(|(pubkey, is_signer, is_writable)| OpAccount {
                        pubkey,
                        is_signer,
                        is_writable,
                    })
                    .collect(),
            })
    }

    #[test]
    fn test_domain_separators_match_names() {
        assert_eq!(
            DOMAIN_SEPARATOR_OP,
            keccak::hash(b"MANY_CHAIN_MULTI_SIG_DOMAIN_SEPARATOR_OP").to_bytes()
        );
        assert_eq!(
            DOMAIN_SEPARATOR_METADATA,
            keccak::hash(b"MANY_CHAIN_MULTI_SIG_DOMAIN_SEPARATOR_METADATA").to_bytes()
        );
    }

    #[test]
    fn test_minimum_preimage_sizes() {
        assert_eq!(metadata_preimage(&RootMetadata::default()).len(), 89);
        assert_eq!(op_preimage(&Op::default()).len(), 136);
    }

    #[test]
    fn test_op_preimage_grows_with_payload() {
        let op = Op {
            data: vec![1, 2, 3],
            remaining_accounts: vec![OpAccount::default()],
            ..Default::default()
        };
        assert_eq!(op_preimage(&op).len(), 136 + 3 + 34);
    }

    #[test]
    fn test_metadata_fields_are_bound() {
        let base = RootMetadata {
            chain_id: 1,
            multisig: Pubkey::new_unique(),
            pre_op_count: 2,
            post_op_count: 5,
            override_previous_root: false,
        };
        let leaf = hash_metadata_leaf(&base);

        let variants = [
            RootMetadata { chain_id: 2, ..base },
            RootMetadata { multisig: Pubkey::new_unique(), ..base },
            RootMetadata { pre_op_count: 3, ..base },
            RootMetadata { post_op_count: 6, ..base },
            RootMetadata { override_previous_root: true, ..base },
        ];
        for variant in variants {
            assert_ne!(leaf, hash_metadata_leaf(&variant));
        }
    }

    #[test]
    fn test_data_and_accounts_are_not_ambiguous() {
        // Moving bytes between the payload and the account list must change the leaf
        let account = OpAccount {
            pubkey: Pubkey::new_unique(),
            is_signer: false,
            is_writable: true,
        };
        let with_account = Op {
            remaining_accounts: vec![account],
            ..Default::default()
        };
        let mut data = account.pubkey.to_bytes().to_vec();
        data.extend_from_slice(&[0, 1]);
        let with_data = Op {
            data,
            ..Default::default()
        };
        assert_ne!(hash_op_leaf(&with_account), hash_op_leaf(&with_data));
    }

    #[test]
    fn test_op_and_metadata_leaves_differ() {
        let multisig = Pubkey::new_unique();
        let metadata = RootMetadata {
            chain_id: 1,
            multisig,
            ..Default::default()
        };
        let op = Op {
            chain_id: 1,
            multisig,
            ..Default::default()
        };
        assert_ne!(hash_metadata_leaf(&metadata), hash_op_leaf(&op));
    }

    proptest! {
        /// No leaf pre-image can be read as a pair of child hashes.
        #[test]
        fn prop_leaves_longer_than_internal_nodes(
            op in arb_op(),
            chain_id in any::<u64>(),
            multisig in arb_pubkey(),
            pre_op_count in any::<u64>(),
            post_op_count in any::<u64>(),
            override_previous_root in any::<bool>(),
        ) {
            prop_assert!(op_preimage(&op).len() > INTERNAL_NODE_PREIMAGE_LEN);

            let metadata = RootMetadata {
                chain_id,
                multisig,
                pre_op_count,
                post_op_count,
                override_previous_root,
            };
            prop_assert!(metadata_preimage(&metadata).len() > INTERNAL_NODE_PREIMAGE_LEN);
        }
    }
}
