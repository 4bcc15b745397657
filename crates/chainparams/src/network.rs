//! Network identifiers and startup selection flags

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network
    Mainnet,
    /// Public test network
    Testnet,
    /// Regression test (local, isolated)
    Regtest,
}

impl NetworkType {
    /// All networks, in the order their profiles are built
    pub const ALL: [NetworkType; 3] = [
        NetworkType::Mainnet,
        NetworkType::Testnet,
        NetworkType::Regtest,
    ];

    /// Short chain name
    pub const fn name(self) -> &'static str {
        match self {
            NetworkType::Mainnet => "main",
            NetworkType::Testnet => "test",
            NetworkType::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkType::Mainnet),
            "test" | "testnet" => Ok(NetworkType::Testnet),
            "regtest" => Ok(NetworkType::Regtest),
            _ => Err(Error::InvalidNetwork(s.to_string())),
        }
    }
}

/// The two mutually exclusive network flags given at startup
/// (`-testnet` and `-regtest`).
///
/// Parsing the command line is the caller's job; this only carries the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupFlags {
    /// `-regtest` was given
    pub regtest: bool,
    /// `-testnet` was given
    pub testnet: bool,
}

impl StartupFlags {
    /// Create flags
    pub const fn new(regtest: bool, testnet: bool) -> Self {
        Self { regtest, testnet }
    }

    /// Resolve the flags to a network.
    ///
    /// Both flags together is a conflict; otherwise regtest wins over
    /// testnet, and no flag means mainnet.
    pub fn network(&self) -> Result<NetworkType> {
        match (self.regtest, self.testnet) {
            (true, true) => Err(Error::ConflictingNetworkSelection),
            (true, false) => Ok(NetworkType::Regtest),
            (false, true) => Ok(NetworkType::Testnet),
            (false, false) => Ok(NetworkType::Mainnet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_names_round_trip() {
        for network in NetworkType::ALL {
            assert_eq!(network.to_string().parse::<NetworkType>().unwrap(), network);
        }
        assert_eq!("TESTNET".parse::<NetworkType>().unwrap(), NetworkType::Testnet);
        assert!(matches!(
            "signet".parse::<NetworkType>(),
            Err(Error::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_flags_resolution() {
        assert_eq!(StartupFlags::new(false, false).network().unwrap(), NetworkType::Mainnet);
        assert_eq!(StartupFlags::new(false, true).network().unwrap(), NetworkType::Testnet);
        assert_eq!(StartupFlags::new(true, false).network().unwrap(), NetworkType::Regtest);
        assert!(matches!(
            StartupFlags::new(true, true).network(),
            Err(Error::ConflictingNetworkSelection)
        ));
    }

    #[test]
    fn test_flags_from_config() {
        let flags: StartupFlags = serde_json::from_str(r#"{"testnet": true}"#).unwrap();
        assert_eq!(flags, StartupFlags::new(false, true));

        let flags: StartupFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags.network().unwrap(), NetworkType::Mainnet);
    }

    #[test]
    fn test_network_type_serde() {
        let json = serde_json::to_string(&NetworkType::Regtest).unwrap();
        assert_eq!(json, "\"regtest\"");
        let parsed: NetworkType = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, NetworkType::Mainnet);
    }
}
