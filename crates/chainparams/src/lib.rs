//! Chain identity parameters
//!
//! This crate provides the constants every node of the network must agree on
//! bit-for-bit: wire magic, ports, difficulty limits, base58 prefixes, block
//! timing, fixed seeds and the self-verified genesis block, for mainnet,
//! testnet and regtest, plus the once-only selection of the active network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod block;
pub mod compact;
pub mod consensus;
pub mod genesis;
pub mod hash;
pub mod network;
pub mod profile;
pub mod registry;
pub mod seeds;

pub use consensus::{ConsensusParams, TIMESPAN_MULTIPLIER};
pub use hash::Hash256;
pub use network::{NetworkType, StartupFlags};
pub use profile::{
    target_spacing, AddressPrefixes, Base58Type, MessageStart, NetworkProfile, ProfileSpec,
};
pub use registry::{active_profile, select_from_startup_flags, select_network, ProfileRegistry};
pub use seeds::{SeedAddress, SeedSpec};

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Genesis block does not match the hard-coded chain identity
    #[error("Chain identity mismatch on {network}: {field} is {computed}, expected {expected}")]
    ChainIdentityMismatch {
        /// Network being built
        network: NetworkType,
        /// Which value differed
        field: &'static str,
        /// Hard-coded value
        expected: Hash256,
        /// Value computed from the genesis block
        computed: Hash256,
    },

    /// Both -testnet and -regtest were requested
    #[error("Invalid combination of -regtest and -testnet")]
    ConflictingNetworkSelection,

    /// A different network was already selected
    #[error("Cannot select {requested}: {active} network is already active")]
    AlreadySelected {
        /// Network already selected
        active: NetworkType,
        /// Network requested
        requested: NetworkType,
    },

    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Invalid hash string
    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    /// Compact target is negative or overflows 256 bits
    #[error("Invalid compact target: {0:#010x}")]
    InvalidCompact(u32),
}

impl Error {
    /// Check if the error means the node must not start
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ChainIdentityMismatch { .. })
    }
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
