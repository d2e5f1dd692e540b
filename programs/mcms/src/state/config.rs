//! Signer set and quorum group tree
//!
//! Signing groups are arranged in a tree. Each group is an interior node with
//! its own quorum; signers are the leaves. A signer is successful iff it
//! furnishes a valid signature, a group is successful iff a quorum of its
//! children are successful, and a root can be set only if group 0 is
//! successful.
//!
//! ```text
//!                    ┌──────┐
//!                 ┌─►│2-of-3│◄───────┐
//!                 │  └──────┘        │
//!                 │        ▲         │
//!              ┌──┴───┐ ┌──┴───┐ ┌───┴────┐
//!          ┌──►│1-of-2│ │2-of-2│ │signer A│
//!          │   └──────┘ └──────┘ └────────┘
//!          │       ▲      ▲  ▲
//!          │       │      │  │     ┌──────┐
//!          │       │      │  └─────┤1-of-2│◄─┐
//!          │       │      │        └──────┘  │
//!  ┌───────┴┐ ┌────┴───┐ ┌┴───────┐ ▲        │
//!  │signer B│ │signer C│ │signer D│ │        │
//!  └────────┘ └────────┘ └────────┘ │        │
//!                            ┌──────┴─┐ ┌────┴───┐
//!                            │signer E│ │signer F│
//!                            └────────┘ └────────┘
//! ```
//!
//! The root group gets index 0 and is its own parent; every other group gets
//! an index greater than its parent's. The tree above becomes
//! `group_quorums = [2, 1, 2, 1, 0, ..]`, `group_parents = [0, 0, 0, 2, 0, ..]`.

use anchor_lang::prelude::*;

use crate::crypto::EvmAddress;
use crate::error::McmsError;

/// Number of signer groups (fixed size of the group arrays)
pub const NUM_GROUPS: usize = 32;

/// Maximum number of signers in a config
pub const MAX_NUM_SIGNERS: usize = 200;

/// Signers returned per `get_config` page (return data is capped at 1024 bytes)
pub const SIGNERS_PER_PAGE: usize = 40;

/// A configured signer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct McmSigner {
    /// keccak256(uncompressed secp256k1 public key)[12..]
    pub evm_address: EvmAddress,

    /// Rank of the signer in the key ordering
    pub index: u8,

    /// 0 <= group < NUM_GROUPS
    pub group: u8,
}

impl McmSigner {
    pub const LEN: usize = 20 + 1 + 1;
}

/// Signer set plus group tree.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Signers ordered by address; position == `index`
    pub signers: Vec<McmSigner>,

    /// Quorum of each group, 0 = disabled
    pub group_quorums: [u8; NUM_GROUPS],

    /// Parent of each group; `group_parents[0] == 0`, otherwise `parent < group`
    pub group_parents: [u8; NUM_GROUPS],
}

impl Config {
    /// Serialized size at full signer capacity
    pub const MAX_LEN: usize = 4 + MAX_NUM_SIGNERS * McmSigner::LEN // signers (vec)
        + NUM_GROUPS // group_quorums
        + NUM_GROUPS; // group_parents

    /// Validate a signer set and group tree and build the config from it.
    ///
    /// # Errors
    /// * `OutOfBoundsNumSigners` - no signers or more than `MAX_NUM_SIGNERS`
    /// * `SignerGroupsLengthMismatch` - one group per signer is required
    /// * `OutOfBoundsGroup` - a signer group is >= `NUM_GROUPS`
    /// * `GroupTreeNotWellFormed` - parent ordering violated
    /// * `SignerInDisabledGroup` - a group with quorum 0 has members
    /// * `OutOfBoundsGroupQuorum` - quorum exceeds the group's member count
    /// * `SignersKeysMustBeStrictlyIncreasing` - unsorted or duplicate addresses
    pub fn new(
        signer_addresses: &[EvmAddress],
        signer_groups: &[u8],
        group_quorums: [u8; NUM_GROUPS],
        group_parents: [u8; NUM_GROUPS],
    ) -> Result<Self> {
        require!(
            !signer_addresses.is_empty() && signer_addresses.len() <= MAX_NUM_SIGNERS,
            McmsError::OutOfBoundsNumSigners
        );
        require!(
            signer_addresses.len() == signer_groups.len(),
            McmsError::SignerGroupsLengthMismatch
        );

        // Members of a group are its signers plus its enabled child groups.
        let mut member_counts = [0usize; NUM_GROUPS];
        for &group in signer_groups {
            require!((group as usize) < NUM_GROUPS, McmsError::OutOfBoundsGroup);
            member_counts[group as usize] += 1;
        }

        // Children always have higher indices than their parent, so walking
        // backwards counts every child before its parent is checked.
        for group in (0..NUM_GROUPS).rev() {
            let parent = group_parents[group] as usize;
            if group == 0 {
                require!(parent == 0, McmsError::GroupTreeNotWellFormed);
            } else {
                require!(parent < group, McmsError::GroupTreeNotWellFormed);
            }

            let quorum = group_quorums[group] as usize;
            if quorum == 0 {
                require!(
                    member_counts[group] == 0,
                    McmsError::SignerInDisabledGroup
                );
            } else {
                require!(
                    member_counts[group] >= quorum,
                    McmsError::OutOfBoundsGroupQuorum
                );
                if group != 0 {
                    member_counts[parent] += 1;
                }
            }
        }

        let mut signers: Vec<McmSigner> = Vec::with_capacity(signer_addresses.len());
        for (index, (address, &group)) in signer_addresses.iter().zip(signer_groups).enumerate() {
            if let Some(previous) = signers.last() {
                require!(
                    previous.evm_address < *address,
                    McmsError::SignersKeysMustBeStrictlyIncreasing
                );
            }
            signers.push(McmSigner {
                evm_address: *address,
                index: index as u8,
                group,
            });
        }

        Ok(Self {
            signers,
            group_quorums,
            group_parents,
        })
    }

    /// A config with no signers has never been set.
    pub fn is_set(&self) -> bool {
        !self.signers.is_empty()
    }

    /// Look up a signer by address (signers are sorted by address).
    pub fn signer(&self, address: &EvmAddress) -> Option<&McmSigner> {
        self.signers
            .binary_search_by(|signer| signer.evm_address.cmp(address))
            .ok()
            .map(|position| &self.signers[position])
    }

    /// One page of the config: the group tree plus up to `SIGNERS_PER_PAGE`
    /// signers starting at `page * SIGNERS_PER_PAGE`.
    pub fn page(&self, page: u8) -> ConfigPage {
        let start = (page as usize * SIGNERS_PER_PAGE).min(self.signers.len());
        let end = (start + SIGNERS_PER_PAGE).min(self.signers.len());

        ConfigPage {
            group_quorums: self.group_quorums,
            group_parents: self.group_parents,
            num_signers: self.signers.len() as u8,
            page,
            signers: self.signers[start..end].to_vec(),
        }
    }
}

/// A page of a config as returned by `get_config`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigPage {
    pub group_quorums: [u8; NUM_GROUPS],
    pub group_parents: [u8; NUM_GROUPS],

    /// Total number of signers in the config
    pub num_signers: u8,

    pub page: u8,

    pub signers: Vec<McmSigner>,
}

impl ConfigPage {
    pub const MAX_LEN: usize = NUM_GROUPS + NUM_GROUPS + 1 + 1 + 4 + SIGNERS_PER_PAGE * McmSigner::LEN;
}

/// Per-group success counters used while evaluating a set of signatures.
#[derive(Debug, Default)]
pub struct GroupTally {
    counts: [u8; NUM_GROUPS],
}

impl GroupTally {
    /// Count one successful signer of `group`.
    ///
    /// A group that reaches its quorum counts once toward its parent, and so
    /// on up to group 0. Later successes in an already successful group do
    /// not propagate again.
    pub fn record(&mut self, config: &Config, group: u8) {
        let mut group = group as usize;
        loop {
            self.counts[group] = self.counts[group].saturating_add(1);
            if self.counts[group] != config.group_quorums[group] || group == 0 {
                break;
            }
            group = config.group_parents[group] as usize;
        }
    }

    /// Whether the root group reached its quorum.
    pub fn is_root_successful(&self, config: &Config) -> bool {
        self.counts[0] >= config.group_quorums[0]
    }

    pub fn count(&self, group: usize) -> u8 {
        self.counts[group]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(n: u8) -> Vec<EvmAddress> {
        (1..=n).map(|i| [i; 20]).collect()
    }

    fn quorums(values: &[u8]) -> [u8; NUM_GROUPS] {
        let mut out = [0u8; NUM_GROUPS];
        out[..values.len()].copy_from_slice(values);
        out
    }

    fn code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// The example tree from the module docs, signers ordered A, C, E, F, D, B.
    fn example_config() -> Config {
        Config::new(
            &addresses(6),
            &[0, 1, 3, 3, 2, 1],
            quorums(&[2, 1, 2, 1]),
            quorums(&[0, 0, 0, 2]),
        )
        .unwrap()
    }

    fn tally(config: &Config, signer_positions: &[usize]) -> GroupTally {
        let mut tally = GroupTally::default();
        for &position in signer_positions {
            tally.record(config, config.signers[position].group);
        }
        tally
    }

    #[test]
    fn test_config_assigns_indices_in_order() {
        let config = example_config();
        assert_eq!(config.signers.len(), 6);
        for (i, signer) in config.signers.iter().enumerate() {
            assert_eq!(signer.index as usize, i);
        }
        assert_eq!(config.signer(&[3u8; 20]).map(|s| s.group), Some(3));
        assert!(config.signer(&[9u8; 20]).is_none());
    }

    #[test]
    fn test_example_tree_quorums() {
        let config = example_config();
        // positions: A=0, C=1, E=2, F=3, D=4, B=5
        assert!(tally(&config, &[0, 5]).is_root_successful(&config));
        assert!(tally(&config, &[5, 4, 2]).is_root_successful(&config));
        assert!(tally(&config, &[5, 4, 2, 3]).is_root_successful(&config));
        assert!(!tally(&config, &[5, 1, 4]).is_root_successful(&config));
    }

    #[test]
    fn test_group_success_propagates_once() {
        let config = example_config();
        // E and F both sign: group 3 is counted once in group 2
        let t = tally(&config, &[2, 3]);
        assert_eq!(t.count(3), 2);
        assert_eq!(t.count(2), 1);
        assert_eq!(t.count(0), 0);
    }

    #[test]
    fn test_num_signers_bounds() {
        let err = Config::new(&[], &[], quorums(&[1]), [0; NUM_GROUPS]).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::OutOfBoundsNumSigners));

        let too_many: Vec<EvmAddress> = (0..=MAX_NUM_SIGNERS as u16)
            .map(|i| {
                let mut a = [0u8; 20];
                a[18..].copy_from_slice(&i.to_be_bytes());
                a
            })
            .collect();
        let groups = vec![0u8; too_many.len()];
        let err = Config::new(&too_many, &groups, quorums(&[1]), [0; NUM_GROUPS]).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::OutOfBoundsNumSigners));
    }

    #[test]
    fn test_max_signers_accepted() {
        let signers: Vec<EvmAddress> = (0..MAX_NUM_SIGNERS as u16)
            .map(|i| {
                let mut a = [0u8; 20];
                a[18..].copy_from_slice(&i.to_be_bytes());
                a
            })
            .collect();
        let groups = vec![0u8; signers.len()];
        let config = Config::new(&signers, &groups, quorums(&[200]), [0; NUM_GROUPS]).unwrap();
        assert_eq!(config.signers.len(), MAX_NUM_SIGNERS);
    }

    #[test]
    fn test_groups_length_mismatch() {
        let err = Config::new(&addresses(2), &[0], quorums(&[1]), [0; NUM_GROUPS]).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::SignerGroupsLengthMismatch));
    }

    #[test]
    fn test_out_of_bounds_group() {
        let err = Config::new(&addresses(2), &[0, 32], quorums(&[1]), [0; NUM_GROUPS]).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::OutOfBoundsGroup));
    }

    #[test]
    fn test_group_tree_not_well_formed() {
        // root must be its own parent
        let err = Config::new(&addresses(1), &[0], quorums(&[1]), quorums(&[1])).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::GroupTreeNotWellFormed));

        // a group cannot be its own parent
        let err = Config::new(&addresses(2), &[0, 1], quorums(&[1, 1]), quorums(&[0, 1])).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::GroupTreeNotWellFormed));

        // parent must come before the child
        let err =
            Config::new(&addresses(2), &[0, 1], quorums(&[1, 1]), quorums(&[0, 2, 0])).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::GroupTreeNotWellFormed));
    }

    #[test]
    fn test_signer_in_disabled_group() {
        let err = Config::new(&addresses(2), &[0, 1], quorums(&[1, 0]), [0; NUM_GROUPS]).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::SignerInDisabledGroup));
    }

    #[test]
    fn test_quorum_exceeds_members() {
        let err = Config::new(&addresses(2), &[0, 0], quorums(&[3]), [0; NUM_GROUPS]).unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::OutOfBoundsGroupQuorum));

        // an enabled child group counts as a member of its parent
        let config = Config::new(&addresses(2), &[0, 1], quorums(&[2, 1]), [0; NUM_GROUPS]);
        assert!(config.is_ok());
    }

    #[test]
    fn test_signers_must_be_strictly_increasing() {
        let err = Config::new(&[[2u8; 20], [1u8; 20]], &[0, 0], quorums(&[1]), [0; NUM_GROUPS])
            .unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::SignersKeysMustBeStrictlyIncreasing));

        let err = Config::new(&[[1u8; 20], [1u8; 20]], &[0, 0], quorums(&[1]), [0; NUM_GROUPS])
            .unwrap_err();
        assert_eq!(code(err), u32::from(McmsError::SignersKeysMustBeStrictlyIncreasing));
    }

    #[test]
    fn test_pages_cover_full_config() {
        let addresses: Vec<EvmAddress> = (0..MAX_NUM_SIGNERS)
            .map(|i| {
                let mut address = [0u8; 20];
                address[18..].copy_from_slice(&(i as u16 + 1).to_be_bytes());
                address
            })
            .collect();
        let config = Config::new(
            &addresses,
            &vec![0; MAX_NUM_SIGNERS],
            quorums(&[100]),
            [0; NUM_GROUPS],
        )
        .unwrap();

        let mut collected = Vec::new();
        for page in 0..5u8 {
            let config_page = config.page(page);
            let mut out = Vec::new();
            config_page.serialize(&mut out).unwrap();
            assert!(out.len() <= ConfigPage::MAX_LEN);
            assert!(ConfigPage::MAX_LEN <= 1024);
            assert_eq!(config_page.num_signers as usize, MAX_NUM_SIGNERS);
            assert_eq!(config_page.group_quorums[0], 100);
            collected.extend(config_page.signers);
        }
        assert_eq!(collected, config.signers);

        assert!(config.page(5).signers.is_empty());
        assert!(config.page(255).signers.is_empty());
    }
}
