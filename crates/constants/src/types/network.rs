use crate::{holesky, mainnet, sepolia, NetworkConstants};
use std::{fmt, str::FromStr};

/// The list of known networks as a string.
const KNOWN_NETWORKS: &str = "mainnet, sepolia, holesky";

/// Error type for parsing a [`Network`] from its name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNetworkError {
    /// The network name is not supported.
    #[error("network name {0} is not parseable. supported networks: {KNOWN_NETWORKS}")]
    NetworkNotSupported(String),
}

/// Networks with a Flashbots relay.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Network {
    /// Ethereum Mainnet.
    #[default]
    Mainnet,
    /// Sepolia testnet.
    Sepolia,
    /// Holesky testnet.
    Holesky,
    /// Local test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl Network {
    /// Get the constants for this network.
    pub const fn constants(self) -> NetworkConstants {
        match self {
            Self::Mainnet => mainnet::MAINNET,
            Self::Sepolia => sepolia::SEPOLIA,
            Self::Holesky => holesky::HOLESKY,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::test_utils::TEST_NETWORK,
        }
    }

    /// Get the chain ID for this network.
    pub const fn chain_id(self) -> u64 {
        self.constants().chain_id()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constants().name())
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "sepolia" => Ok(Self::Sepolia),
            "holesky" => Ok(Self::Holesky),
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            _ => Err(ParseNetworkError::NetworkNotSupported(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_networks() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(" Sepolia ".parse::<Network>().unwrap(), Network::Sepolia);
        assert_eq!("HOLESKY".parse::<Network>().unwrap(), Network::Holesky);
    }

    #[test]
    fn rejects_unknown_network() {
        let err = "goerli".parse::<Network>().unwrap_err();
        assert_eq!(err, ParseNetworkError::NetworkNotSupported("goerli".to_string()));
        assert!(err.to_string().contains(KNOWN_NETWORKS));
    }

    #[test]
    fn display_round_trips() {
        for network in [Network::Mainnet, Network::Sepolia, Network::Holesky] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), 1);
        assert_eq!(Network::Holesky.chain_id(), 17000);
    }
}
