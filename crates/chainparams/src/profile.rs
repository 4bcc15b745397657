//! Network profiles: the chain-identity constants of each network
//!
//! Every profile is built by one function from a [`ProfileSpec`]. Testnet's
//! spec is mainnet's with a list of overrides applied, and regtest's is
//! testnet's with further overrides, so the three networks share one
//! derivation path and differ only in data.

use crate::block::Block;
use crate::compact::{compact_from_target, limit_with_leading_zero_bits};
use crate::consensus::ConsensusParams;
use crate::genesis::{
    build_genesis_block, verify_genesis, GenesisParams, GENESIS_MESSAGE, GENESIS_TAG, GENESIS_TIME,
};
use crate::hash::Hash256;
use crate::network::NetworkType;
use crate::seeds::{convert_seeds_now, SeedAddress, SeedSpec, MAIN_SEEDS, TEST_SEEDS};
use primitive_types::U256;
use std::path::{Path, PathBuf};

/// Four bytes prefixing every wire message on a network
pub type MessageStart = [u8; 4];

const ALERT_PUBKEY_HEX: &str = concat!(
    "04e80695c62f7c2f81f85d251a216df3be197653f454852a2d08c631aad5ca3cbe",
    "5616262ca3e7a6feef6a54765b96e9056bc6b132a04b94acefeac5d5257fe028",
);

const GENESIS_MERKLE_ROOT: &str =
    "94c24a215448c39c25d020ceb6ed37fa4cb70bfabf3b45091876a6d027746537";

/// Base58 payload kinds that carry a network prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    /// Pay-to-pubkey-hash address
    PubkeyAddress,
    /// Pay-to-script-hash address
    ScriptAddress,
    /// WIF private key
    SecretKey,
    /// BIP32 extended public key
    ExtPublicKey,
    /// BIP32 extended private key
    ExtSecretKey,
}

/// Base58 version prefixes of one network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPrefixes {
    /// Pubkey address prefix
    pub pubkey_address: &'static [u8],
    /// Script address prefix
    pub script_address: &'static [u8],
    /// Secret key prefix
    pub secret_key: &'static [u8],
    /// Extended public key prefix
    pub ext_public_key: &'static [u8],
    /// Extended secret key prefix
    pub ext_secret_key: &'static [u8],
}

impl AddressPrefixes {
    /// Prefix for `kind`
    pub fn get(&self, kind: Base58Type) -> &'static [u8] {
        match kind {
            Base58Type::PubkeyAddress => self.pubkey_address,
            Base58Type::ScriptAddress => self.script_address,
            Base58Type::SecretKey => self.secret_key,
            Base58Type::ExtPublicKey => self.ext_public_key,
            Base58Type::ExtSecretKey => self.ext_secret_key,
        }
    }
}

const MAIN_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_address: &[69],
    script_address: &[96],
    secret_key: &[99],
    ext_public_key: &[0x04, 0x99, 0xa9, 0x3c],
    ext_secret_key: &[0x04, 0x99, 0x6e, 0xd1],
};

const TEST_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_address: &[71],
    script_address: &[116],
    secret_key: &[53],
    ext_public_key: &[0x04, 0x66, 0x4f, 0x8c],
    ext_secret_key: &[0x04, 0x55, 0xea, 0x7b],
};

const REGTEST_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_address: &[111],
    ..TEST_PREFIXES
};

/// Inputs to [`NetworkProfile::build`].
#[derive(Debug, Clone)]
pub struct ProfileSpec {
    /// Network
    pub network: NetworkType,
    /// Wire magic
    pub message_start: MessageStart,
    /// P2P port
    pub default_port: u16,
    /// RPC port
    pub rpc_port: u16,
    /// Alert public key (hex)
    pub alert_pubkey_hex: &'static str,
    /// Base58 prefixes
    pub prefixes: AddressPrefixes,
    /// Timing and difficulty limits
    pub consensus: ConsensusParams,
    /// Data directory name, empty for the root
    pub data_dir_name: &'static str,
    /// Fixed seed table
    pub seeds: &'static [SeedSpec],
    /// Whether RPC requires a password
    pub requires_rpc_password: bool,
    /// Genesis inputs
    pub genesis: GenesisParams,
    /// Expected genesis hash (display hex)
    pub genesis_hash: &'static str,
    /// Expected genesis Merkle root (display hex)
    pub genesis_merkle_root: &'static str,
}

impl ProfileSpec {
    /// Mainnet constants, the base every other network derives from
    pub fn mainnet() -> Self {
        let limit = limit_with_leading_zero_bits(20);
        Self {
            network: NetworkType::Mainnet,
            message_start: [0x5a, 0x9e, 0x2b, 0x47],
            default_port: 16969,
            rpc_port: 16968,
            alert_pubkey_hex: ALERT_PUBKEY_HEX,
            prefixes: MAIN_PREFIXES,
            consensus: ConsensusParams {
                pow_limit: limit,
                pos_limit: limit,
                pow_target_spacing: 69,
                pos_target_spacing: Some(40),
                last_pow_block: 6969,
                start_pos_block: 1,
            },
            data_dir_name: "",
            seeds: MAIN_SEEDS,
            requires_rpc_password: true,
            genesis: GenesisParams {
                version: 1,
                time: GENESIS_TIME,
                bits: 0x1e0f_ffff,
                nonce: 536_192,
                message: GENESIS_MESSAGE,
                tag: GENESIS_TAG,
            },
            genesis_hash: "72d1c73ef8a7fc172c1a75335498d8a5df76eadc85796551f333f61ebd41ebf4",
            genesis_merkle_root: GENESIS_MERKLE_ROOT,
        }
    }

    /// Testnet: mainnet with looser limits, its own ports, prefixes and seeds
    pub fn testnet() -> Self {
        let base = Self::mainnet();
        let limit = limit_with_leading_zero_bits(16);
        Self {
            network: NetworkType::Testnet,
            message_start: [0x69, 0x0d, 0xe5, 0x81],
            default_port: 26969,
            rpc_port: 26968,
            prefixes: TEST_PREFIXES,
            consensus: ConsensusParams {
                pow_limit: limit,
                pos_limit: limit,
                pos_target_spacing: None,
                last_pow_block: 690,
                ..base.consensus
            },
            data_dir_name: "testnet",
            seeds: TEST_SEEDS,
            genesis: GenesisParams {
                bits: compact_from_target(limit),
                nonce: 79_462,
                ..base.genesis
            },
            genesis_hash: "ae139d6824c3a18a4813212efd48a44b350df2c9d917fd5bd6147a84b765008f",
            ..base
        }
    }

    /// Regtest: testnet with trivial mining, no seeds and no RPC password
    pub fn regtest() -> Self {
        let base = Self::testnet();
        let limit = limit_with_leading_zero_bits(1);
        Self {
            network: NetworkType::Regtest,
            message_start: [0x71, 0xf3, 0x69, 0xc2],
            default_port: 16970,
            prefixes: REGTEST_PREFIXES,
            consensus: ConsensusParams {
                pow_limit: limit,
                ..base.consensus
            },
            data_dir_name: "regtest",
            seeds: &[],
            requires_rpc_password: false,
            genesis: GenesisParams {
                time: GENESIS_TIME,
                bits: compact_from_target(limit),
                nonce: 9_087,
                ..base.genesis
            },
            genesis_hash: "e3f4d3de994e7e8962c03f07a976d29d25f2f33ea0d86f4907d8d68525f72ec0",
            ..base
        }
    }

    /// Spec for `network`
    pub fn for_network(network: NetworkType) -> Self {
        match network {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
            NetworkType::Regtest => Self::regtest(),
        }
    }
}

/// Immutable chain-identity constants of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    network: NetworkType,
    message_start: MessageStart,
    default_port: u16,
    rpc_port: u16,
    alert_pubkey: Vec<u8>,
    prefixes: AddressPrefixes,
    consensus: ConsensusParams,
    data_dir_name: &'static str,
    fixed_seeds: Vec<SeedAddress>,
    requires_rpc_password: bool,
    genesis: Block,
    genesis_hash: Hash256,
}

impl NetworkProfile {
    /// Build a profile and check its genesis block.
    ///
    /// # Panics
    ///
    /// Panics if the genesis block does not hash to the hard-coded hash and
    /// Merkle root. A node must not run on a chain identity it cannot verify.
    pub fn build(spec: ProfileSpec) -> Self {
        let expected_hash: Hash256 = spec
            .genesis_hash
            .parse()
            .expect("hard-coded genesis hash parses");
        let expected_merkle: Hash256 = spec
            .genesis_merkle_root
            .parse()
            .expect("hard-coded merkle root parses");
        let alert_pubkey =
            hex::decode(spec.alert_pubkey_hex).expect("hard-coded alert key parses");

        let genesis = build_genesis_block(&spec.genesis);
        let genesis_hash =
            match verify_genesis(spec.network, &genesis, &expected_hash, &expected_merkle) {
                Ok(hash) => hash,
                Err(e) => {
                    tracing::error!("Refusing to start: {}", e);
                    panic!("{}", e);
                }
            };

        Self {
            network: spec.network,
            message_start: spec.message_start,
            default_port: spec.default_port,
            rpc_port: spec.rpc_port,
            alert_pubkey,
            prefixes: spec.prefixes,
            consensus: spec.consensus,
            data_dir_name: spec.data_dir_name,
            fixed_seeds: convert_seeds_now(spec.seeds),
            requires_rpc_password: spec.requires_rpc_password,
            genesis,
            genesis_hash,
        }
    }

    /// Mainnet profile
    pub fn mainnet() -> Self {
        Self::build(ProfileSpec::mainnet())
    }

    /// Testnet profile
    pub fn testnet() -> Self {
        Self::build(ProfileSpec::testnet())
    }

    /// Regtest profile
    pub fn regtest() -> Self {
        Self::build(ProfileSpec::regtest())
    }

    /// Profile for `network`
    pub fn from_type(network: NetworkType) -> Self {
        Self::build(ProfileSpec::for_network(network))
    }

    /// Which network this profile describes
    pub fn network_identifier(&self) -> NetworkType {
        self.network
    }

    /// Wire magic
    pub fn magic_bytes(&self) -> &MessageStart {
        &self.message_start
    }

    /// P2P port
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// RPC port
    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    /// Easiest allowed proof-of-work target
    pub fn proof_of_work_limit(&self) -> U256 {
        self.consensus.pow_limit
    }

    /// Easiest allowed proof-of-stake target
    pub fn proof_of_stake_limit(&self) -> U256 {
        self.consensus.pos_limit
    }

    /// Raw alert public key
    pub fn alert_public_key(&self) -> &[u8] {
        &self.alert_pubkey
    }

    /// Base58 prefix for `kind`
    pub fn base58_prefix(&self, kind: Base58Type) -> &'static [u8] {
        self.prefixes.get(kind)
    }

    /// All base58 prefixes
    pub fn address_prefixes(&self) -> &AddressPrefixes {
        &self.prefixes
    }

    /// Consensus timing and limits
    pub fn consensus(&self) -> &ConsensusParams {
        &self.consensus
    }

    /// Target spacing at the given chain height
    pub fn target_spacing(&self, current_height: u32) -> u32 {
        self.consensus.target_spacing(current_height)
    }

    /// Retarget timespan at the given chain height
    pub fn target_timespan(&self, current_height: u32) -> u32 {
        self.consensus.target_timespan(current_height)
    }

    /// Last height accepting proof-of-work blocks
    pub fn last_proof_of_work_block_height(&self) -> u32 {
        self.consensus.last_pow_block
    }

    /// First height accepting proof-of-stake blocks
    pub fn start_proof_of_stake_block_height(&self) -> u32 {
        self.consensus.start_pos_block
    }

    /// Data directory name (empty for mainnet, which uses the root)
    pub fn data_directory_name(&self) -> &'static str {
        self.data_dir_name
    }

    /// This network's data directory under `root`
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        if self.data_dir_name.is_empty() {
            root.to_path_buf()
        } else {
            root.join(self.data_dir_name)
        }
    }

    /// Bootstrap addresses
    pub fn fixed_seeds(&self) -> &[SeedAddress] {
        &self.fixed_seeds
    }

    /// The genesis block
    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    /// Verified genesis hash
    pub fn genesis_hash(&self) -> Hash256 {
        self.genesis_hash
    }

    /// Whether the RPC server must be protected by a password
    pub fn requires_rpc_password(&self) -> bool {
        self.requires_rpc_password
    }
}

/// Target spacing for `profile` at `current_height`.
pub fn target_spacing(current_height: u32, profile: &NetworkProfile) -> u32 {
    profile.target_spacing(current_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_profile() {
        let main = NetworkProfile::mainnet();
        assert_eq!(main.network_identifier(), NetworkType::Mainnet);
        assert_eq!(main.magic_bytes(), &[0x5a, 0x9e, 0x2b, 0x47]);
        assert_eq!(main.default_port(), 16969);
        assert_eq!(main.rpc_port(), 16968);
        assert_eq!(main.last_proof_of_work_block_height(), 6969);
        assert_eq!(main.start_proof_of_stake_block_height(), 1);
        assert_eq!(main.data_directory_name(), "");
        assert_eq!(main.fixed_seeds().len(), MAIN_SEEDS.len());
        assert!(main.requires_rpc_password());
        assert_eq!(main.alert_public_key().len(), 65);
        assert_eq!(main.alert_public_key()[0], 0x04);
    }

    #[test]
    fn test_testnet_overrides() {
        let test = NetworkProfile::testnet();
        assert_eq!(test.default_port(), 26969);
        assert_eq!(test.rpc_port(), 26968);
        assert_eq!(test.data_directory_name(), "testnet");
        assert_eq!(test.last_proof_of_work_block_height(), 690);
        assert_eq!(test.genesis_block().header.bits, 0x1f00_ffff);
        assert_eq!(test.fixed_seeds().len(), TEST_SEEDS.len());
        assert_eq!(test.base58_prefix(Base58Type::ScriptAddress), &[116]);
        assert!(test.requires_rpc_password());
    }

    #[test]
    fn test_regtest_overrides() {
        let regtest = NetworkProfile::regtest();
        assert_eq!(regtest.default_port(), 16970);
        assert_eq!(regtest.rpc_port(), 26968);
        assert_eq!(regtest.genesis_block().header.bits, 0x207f_ffff);
        assert_eq!(regtest.genesis_block().header.time, GENESIS_TIME);
        assert_eq!(regtest.proof_of_work_limit(), U256::MAX >> 1);
        assert_eq!(regtest.proof_of_stake_limit(), U256::MAX >> 16);
        assert!(regtest.fixed_seeds().is_empty());
        assert!(!regtest.requires_rpc_password());
        assert_eq!(regtest.data_directory_name(), "regtest");
    }

    #[test]
    fn test_prefix_lookup() {
        let main = NetworkProfile::mainnet();
        assert_eq!(main.base58_prefix(Base58Type::PubkeyAddress), &[69]);
        assert_eq!(main.base58_prefix(Base58Type::SecretKey), &[99]);
        assert_eq!(
            main.base58_prefix(Base58Type::ExtPublicKey),
            &[0x04, 0x99, 0xa9, 0x3c]
        );
        assert_eq!(
            main.base58_prefix(Base58Type::ExtSecretKey),
            &[0x04, 0x99, 0x6e, 0xd1]
        );
    }

    #[test]
    fn test_data_dir() {
        let root = Path::new("/var/lib/node");
        assert_eq!(NetworkProfile::mainnet().data_dir(root), PathBuf::from("/var/lib/node"));
        assert_eq!(
            NetworkProfile::regtest().data_dir(root),
            PathBuf::from("/var/lib/node/regtest")
        );
    }

    #[test]
    fn test_spacing_is_query_time() {
        let main = NetworkProfile::mainnet();
        assert_eq!(target_spacing(0, &main), 69);
        assert_eq!(target_spacing(6970, &main), 40);

        let test = NetworkProfile::testnet();
        assert_eq!(target_spacing(100_000, &test), 69);
    }

    #[test]
    #[should_panic(expected = "genesis hash")]
    fn test_build_panics_on_identity_mismatch() {
        let spec = ProfileSpec {
            genesis_hash: "0000000000000000000000000000000000000000000000000000000000000001",
            ..ProfileSpec::mainnet()
        };
        NetworkProfile::build(spec);
    }

    #[test]
    #[should_panic(expected = "merkle root")]
    fn test_build_panics_on_altered_message() {
        let mut spec = ProfileSpec::testnet();
        spec.genesis.message = "a different headline";
        NetworkProfile::build(spec);
    }
}
