//! Selection of the active network profile
//!
//! All three profiles are built up front, so every genesis check runs at
//! startup whichever network ends up selected. The selection itself is
//! written once; after that the active profile can be shared freely.

use crate::network::{NetworkType, StartupFlags};
use crate::profile::{MessageStart, NetworkProfile};
use crate::{Error, Result};
use once_cell::sync::{Lazy, OnceCell};

/// The three network profiles and the selected one
#[derive(Debug)]
pub struct ProfileRegistry {
    mainnet: NetworkProfile,
    testnet: NetworkProfile,
    regtest: NetworkProfile,
    active: OnceCell<NetworkType>,
}

impl ProfileRegistry {
    /// Build every profile.
    ///
    /// # Panics
    ///
    /// Panics if any network's genesis block fails its self-check.
    pub fn new() -> Self {
        Self {
            mainnet: NetworkProfile::mainnet(),
            testnet: NetworkProfile::testnet(),
            regtest: NetworkProfile::regtest(),
            active: OnceCell::new(),
        }
    }

    /// The process-wide registry, built on first use
    pub fn global() -> &'static ProfileRegistry {
        static REGISTRY: Lazy<ProfileRegistry> = Lazy::new(ProfileRegistry::new);
        &REGISTRY
    }

    /// Profile of `network`, selected or not
    pub fn profile(&self, network: NetworkType) -> &NetworkProfile {
        match network {
            NetworkType::Mainnet => &self.mainnet,
            NetworkType::Testnet => &self.testnet,
            NetworkType::Regtest => &self.regtest,
        }
    }

    /// Make `network` the active network.
    ///
    /// The selection can be made once. Repeating it with the same network is
    /// a no-op; naming a different network afterwards fails with
    /// [`Error::AlreadySelected`] and leaves the selection as it was.
    pub fn select_network(&self, network: NetworkType) -> Result<&NetworkProfile> {
        let active = *self.active.get_or_init(|| {
            tracing::info!("Selected {} network", network);
            network
        });

        if active != network {
            tracing::warn!(
                "Ignoring selection of {} network, {} is already active",
                network,
                active
            );
            return Err(Error::AlreadySelected {
                active,
                requested: network,
            });
        }

        Ok(self.profile(active))
    }

    /// Select the network named by the startup flags.
    ///
    /// Both flags together is [`Error::ConflictingNetworkSelection`] and
    /// selects nothing.
    pub fn select_from_flags(&self, flags: &StartupFlags) -> Result<&NetworkProfile> {
        let network = flags.network().map_err(|e| {
            tracing::warn!("Rejected network flags: {}", e);
            e
        })?;
        self.select_network(network)
    }

    /// Select from the `-regtest` and `-testnet` flags
    pub fn select_from_startup_flags(
        &self,
        regtest: bool,
        testnet: bool,
    ) -> Result<&NetworkProfile> {
        self.select_from_flags(&StartupFlags::new(regtest, testnet))
    }

    /// The selected network, if a selection has been made
    pub fn selected_network(&self) -> Option<NetworkType> {
        self.active.get().copied()
    }

    /// The active profile; mainnet until a selection is made.
    pub fn active_profile(&self) -> &NetworkProfile {
        self.profile(self.selected_network().unwrap_or(NetworkType::Mainnet))
    }

    /// The network whose wire messages start with `magic`
    pub fn network_for_magic(&self, magic: &MessageStart) -> Option<NetworkType> {
        NetworkType::ALL
            .into_iter()
            .find(|network| self.profile(*network).magic_bytes() == magic)
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Select the active network of the global registry
pub fn select_network(network: NetworkType) -> Result<&'static NetworkProfile> {
    ProfileRegistry::global().select_network(network)
}

/// Select the global registry's network from the startup flags
pub fn select_from_startup_flags(
    regtest: bool,
    testnet: bool,
) -> Result<&'static NetworkProfile> {
    ProfileRegistry::global().select_from_startup_flags(regtest, testnet)
}

/// Active profile of the global registry
pub fn active_profile() -> &'static NetworkProfile {
    ProfileRegistry::global().active_profile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mainnet() {
        let registry = ProfileRegistry::new();
        assert_eq!(registry.selected_network(), None);
        assert_eq!(
            registry.active_profile().network_identifier(),
            NetworkType::Mainnet
        );
    }

    #[test]
    fn test_flag_mapping() {
        let cases = [
            (false, false, NetworkType::Mainnet),
            (false, true, NetworkType::Testnet),
            (true, false, NetworkType::Regtest),
        ];
        for (regtest, testnet, expected) in cases {
            let registry = ProfileRegistry::new();
            let profile = registry.select_from_startup_flags(regtest, testnet).unwrap();
            assert_eq!(profile.network_identifier(), expected);
            assert_eq!(registry.active_profile().network_identifier(), expected);
        }
    }

    #[test]
    fn test_conflicting_flags_select_nothing() {
        let registry = ProfileRegistry::new();
        assert!(matches!(
            registry.select_from_startup_flags(true, true),
            Err(Error::ConflictingNetworkSelection)
        ));
        assert_eq!(registry.selected_network(), None);
    }

    #[test]
    fn test_conflicting_flags_keep_previous_selection() {
        let registry = ProfileRegistry::new();
        registry.select_network(NetworkType::Testnet).unwrap();
        assert!(registry.select_from_startup_flags(true, true).is_err());
        assert_eq!(
            registry.active_profile().network_identifier(),
            NetworkType::Testnet
        );
    }

    #[test]
    fn test_selection_is_written_once() {
        let registry = ProfileRegistry::new();
        registry.select_network(NetworkType::Regtest).unwrap();
        assert!(registry.select_network(NetworkType::Regtest).is_ok());

        let err = registry.select_network(NetworkType::Mainnet).unwrap_err();
        assert!(matches!(
            err,
            Error::AlreadySelected {
                active: NetworkType::Regtest,
                requested: NetworkType::Mainnet,
            }
        ));
        assert_eq!(registry.selected_network(), Some(NetworkType::Regtest));
    }

    #[test]
    fn test_network_for_magic() {
        let registry = ProfileRegistry::new();
        for network in NetworkType::ALL {
            let magic = *registry.profile(network).magic_bytes();
            assert_eq!(registry.network_for_magic(&magic), Some(network));
        }
        assert_eq!(registry.network_for_magic(&[0xf9, 0xbe, 0xb4, 0xd9]), None);
    }
}
