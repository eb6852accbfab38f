//! Network resolution and per-network contract deployments.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Networks the SDK knows deployments for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Ethereum mainnet.
    Main = 1,
    /// Ropsten testnet.
    Ropsten = 3,
}

impl Network {
    /// Resolves a provider-reported chain id string. Unrecognized ids
    /// resolve to `None`; that is not an error.
    pub fn from_version(version: &str) -> Option<Self> {
        match version {
            "1" => Some(Self::Main),
            "3" => Some(Self::Ropsten),
            _ => None,
        }
    }

    /// Numeric chain id.
    pub fn chain_id(&self) -> u64 {
        *self as u64
    }

    /// Network name as the SDK reports it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Ropsten => "ropsten",
        }
    }
}

/// Addresses of the token and registry contract deployments on a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// ERC20-style token contract.
    pub token: Address,
    /// Chain-registry contract.
    pub registry: Address,
}

/// Mainnet deployment.
pub const MAIN_ADDRESSES: ContractAddresses = ContractAddresses {
    token: address!("163733bcc28dbf26b41a8cfa83e369b5b3af741b"),
    registry: address!("6c0cc43d6f89d81356e9dc4a0c2fd9838f0fb3e7"),
};

/// Ropsten deployment.
pub const ROPSTEN_ADDRESSES: ContractAddresses = ContractAddresses {
    token: address!("2af8f51cc4c3c0daef1a3057bc1d9abc346ca6a3"),
    registry: address!("9ed11266ad598257ba0a62cdc129a28a6e701bda"),
};

impl ContractAddresses {
    /// Default deployment for a resolved network. An unresolved network
    /// falls back to the mainnet table; callers on exotic networks
    /// reinitialize with explicit overrides.
    pub fn defaults_for(network: Option<Network>) -> Self {
        match network {
            Some(Network::Ropsten) => ROPSTEN_ADDRESSES,
            Some(Network::Main) | None => MAIN_ADDRESSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_versions_resolve() {
        assert_eq!(Network::from_version("1"), Some(Network::Main));
        assert_eq!(Network::from_version("3"), Some(Network::Ropsten));
    }

    #[test]
    fn test_unknown_version_resolves_to_none() {
        assert_eq!(Network::from_version("42"), None);
        assert_eq!(Network::from_version(""), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Network::Main.name(), "main");
        assert_eq!(Network::Ropsten.name(), "ropsten");
        assert_eq!(Network::Main.chain_id(), 1);
    }

    #[test]
    fn test_defaults_per_network() {
        assert_eq!(
            ContractAddresses::defaults_for(Some(Network::Ropsten)),
            ROPSTEN_ADDRESSES
        );
        assert_eq!(ContractAddresses::defaults_for(None), MAIN_ADDRESSES);
    }
}
