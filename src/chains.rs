//! Static chain configuration and registry.
//!
//! One immutable [`ChainConfig`] per chain per network mode; the registry is
//! built once and never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};
use crate::types::{Chain, NetworkMode};

/// Native currency descriptor for a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name (e.g., "Ether").
    pub name: String,
    /// Currency symbol (e.g., "ETH").
    pub symbol: String,
    /// Decimal places of the native currency.
    pub decimals: u8,
}

impl NativeCurrency {
    fn new(name: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
        }
    }
}

/// Static per-chain configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain this config belongs to.
    pub chain: Chain,
    /// Numeric chain id (EVM chain id, Solana cluster id, 0 for Bitcoin).
    pub chain_id: u64,
    /// Wormhole chain id, if the chain is wired into the guardian network.
    pub wormhole_chain_id: Option<u16>,
    /// RPC endpoint.
    pub rpc_url: String,
    /// MIGA token address on this chain.
    pub token_address: String,
    /// Bridge contract address, if deployed.
    pub bridge_address: Option<String>,
    /// Block explorer URL.
    pub explorer_url: String,
    /// Decimal precision of the MIGA token on this chain.
    pub decimals: u8,
    /// Whether the chain is EVM compatible.
    pub is_evm: bool,
    /// Native currency descriptor.
    pub native_currency: NativeCurrency,
}

impl ChainConfig {
    fn solana() -> Self {
        Self {
            chain: Chain::Solana,
            chain_id: 101,
            wormhole_chain_id: Some(1),
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            token_address: "MiGAxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".to_string(),
            bridge_address: Some("worm2ZoG2kUd4vFXhvjh93UUH596ayRfgQ2MgjNMTth".to_string()),
            explorer_url: "https://solscan.io".to_string(),
            decimals: 9,
            is_evm: false,
            native_currency: NativeCurrency::new("Solana", "SOL", 9),
        }
    }

    fn ethereum() -> Self {
        Self {
            chain: Chain::Ethereum,
            chain_id: 1,
            wormhole_chain_id: Some(2),
            rpc_url: "https://eth.llamarpc.com".to_string(),
            token_address: "0x0000000000000000000000000000000000000000".to_string(),
            bridge_address: Some("0x3ee18B2214AFF97000D974cf647E7C347E8fa585".to_string()),
            explorer_url: "https://etherscan.io".to_string(),
            decimals: 18,
            is_evm: true,
            native_currency: NativeCurrency::new("Ether", "ETH", 18),
        }
    }

    fn base() -> Self {
        Self {
            chain: Chain::Base,
            chain_id: 8453,
            wormhole_chain_id: Some(30),
            rpc_url: "https://mainnet.base.org".to_string(),
            token_address: "0x0000000000000000000000000000000000000000".to_string(),
            bridge_address: Some("0x8d2de8d2f73F1F4cAB472AC9A881C9b123C79627".to_string()),
            explorer_url: "https://basescan.org".to_string(),
            decimals: 18,
            is_evm: true,
            native_currency: NativeCurrency::new("Ether", "ETH", 18),
        }
    }

    fn arbitrum() -> Self {
        Self {
            chain: Chain::Arbitrum,
            chain_id: 42161,
            wormhole_chain_id: Some(23),
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            token_address: "0x0000000000000000000000000000000000000000".to_string(),
            bridge_address: Some("0x0b2402144Bb366A632D14B83F244D2e0e21bD39c".to_string()),
            explorer_url: "https://arbiscan.io".to_string(),
            decimals: 18,
            is_evm: true,
            native_currency: NativeCurrency::new("Ether", "ETH", 18),
        }
    }

    fn polygon() -> Self {
        Self {
            chain: Chain::Polygon,
            chain_id: 137,
            wormhole_chain_id: Some(5),
            rpc_url: "https://polygon-rpc.com".to_string(),
            token_address: "0x0000000000000000000000000000000000000000".to_string(),
            bridge_address: Some("0x5a58505a96D1dbf8dF91cB21B54419FC36e93fdE".to_string()),
            explorer_url: "https://polygonscan.com".to_string(),
            decimals: 18,
            is_evm: true,
            native_currency: NativeCurrency::new("Matic", "MATIC", 18),
        }
    }

    fn lux() -> Self {
        Self {
            chain: Chain::Lux,
            chain_id: 96369,
            wormhole_chain_id: None,
            rpc_url: "https://api.lux.network/rpc".to_string(),
            token_address: "0x0000000000000000000000000000000000000000".to_string(),
            bridge_address: Some("0x0000000000000000000000000000000000000000".to_string()),
            explorer_url: "https://explore.lux.network".to_string(),
            decimals: 18,
            is_evm: true,
            native_currency: NativeCurrency::new("Lux", "LUX", 18),
        }
    }

    fn bitcoin() -> Self {
        Self {
            chain: Chain::Bitcoin,
            chain_id: 0,
            wormhole_chain_id: None,
            rpc_url: String::new(),
            token_address: String::new(),
            bridge_address: None,
            explorer_url: "https://mempool.space".to_string(),
            decimals: 8,
            is_evm: false,
            native_currency: NativeCurrency::new("Bitcoin", "BTC", 8),
        }
    }

    fn mainnet(chain: Chain) -> Self {
        match chain {
            Chain::Solana => Self::solana(),
            Chain::Ethereum => Self::ethereum(),
            Chain::Base => Self::base(),
            Chain::Arbitrum => Self::arbitrum(),
            Chain::Polygon => Self::polygon(),
            Chain::Lux => Self::lux(),
            Chain::Bitcoin => Self::bitcoin(),
        }
    }

    /// Testnet configs reuse the mainnet shape with endpoint overrides.
    fn testnet(chain: Chain) -> Self {
        let mut config = Self::mainnet(chain);
        match chain {
            Chain::Solana => {
                config.chain_id = 102;
                config.rpc_url = "https://api.devnet.solana.com".to_string();
                config.explorer_url = "https://solscan.io?cluster=devnet".to_string();
            }
            Chain::Ethereum => {
                config.chain_id = 11155111;
                config.rpc_url = "https://rpc.sepolia.org".to_string();
                config.explorer_url = "https://sepolia.etherscan.io".to_string();
            }
            Chain::Base => {
                config.chain_id = 84532;
                config.rpc_url = "https://sepolia.base.org".to_string();
                config.explorer_url = "https://sepolia.basescan.org".to_string();
            }
            Chain::Arbitrum => {
                config.chain_id = 421614;
                config.rpc_url = "https://sepolia-rollup.arbitrum.io/rpc".to_string();
                config.explorer_url = "https://sepolia.arbiscan.io".to_string();
            }
            Chain::Polygon => {
                config.chain_id = 80002;
                config.rpc_url = "https://rpc-amoy.polygon.technology".to_string();
                config.explorer_url = "https://amoy.polygonscan.com".to_string();
            }
            Chain::Lux => {
                config.chain_id = 96368;
                config.rpc_url = "https://api.lux-test.network/rpc".to_string();
                config.explorer_url = "https://explore.lux-test.network".to_string();
            }
            Chain::Bitcoin => {
                config.explorer_url = "https://mempool.space/testnet".to_string();
            }
        }
        config
    }
}

/// Immutable registry of chain configurations for one network mode.
#[derive(Clone, Debug)]
pub struct ChainRegistry {
    mode: NetworkMode,
    configs: HashMap<Chain, ChainConfig>,
}

impl ChainRegistry {
    /// Build the registry for a network mode.
    pub fn new(mode: NetworkMode) -> Self {
        let configs = Chain::ALL
            .iter()
            .map(|&chain| {
                let config = match mode {
                    NetworkMode::Mainnet => ChainConfig::mainnet(chain),
                    NetworkMode::Testnet => ChainConfig::testnet(chain),
                };
                (chain, config)
            })
            .collect();

        Self { mode, configs }
    }

    /// Network mode this registry was built for.
    pub fn mode(&self) -> NetworkMode {
        self.mode
    }

    /// Look up the config for a chain.
    pub fn config_for(&self, chain: Chain) -> BridgeResult<&ChainConfig> {
        self.configs
            .get(&chain)
            .ok_or(BridgeError::UnknownChain(chain))
    }

    /// Check if a chain is wired into the Wormhole guardian network.
    ///
    /// Lux and Bitcoin are not; routes touching them must go around Wormhole.
    pub fn is_wormhole_supported(&self, chain: Chain) -> bool {
        self.configs
            .get(&chain)
            .map(|c| c.wormhole_chain_id.is_some())
            .unwrap_or(false)
    }

    /// Check if a chain is EVM compatible.
    pub fn is_evm(&self, chain: Chain) -> bool {
        self.configs
            .get(&chain)
            .map(|c| c.is_evm)
            .unwrap_or(false)
    }

    /// Wormhole chain id for a chain.
    pub fn wormhole_chain_id(&self, chain: Chain) -> BridgeResult<u16> {
        self.config_for(chain)?
            .wormhole_chain_id
            .ok_or(BridgeError::UnsupportedRoute {
                from: chain,
                to: chain,
            })
    }

    /// Minimum bridgeable amount for a chain: 1 MIGA in smallest units.
    pub fn min_bridge_amount(&self, chain: Chain) -> u128 {
        let decimals = self
            .configs
            .get(&chain)
            .map(|c| c.decimals)
            .unwrap_or(0);
        10u128.pow(u32::from(decimals))
    }

    /// Token decimal precision for a chain.
    pub fn decimals(&self, chain: Chain) -> BridgeResult<u8> {
        Ok(self.config_for(chain)?.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_chains() {
        let registry = ChainRegistry::new(NetworkMode::Mainnet);
        for chain in Chain::ALL {
            assert!(registry.config_for(chain).is_ok());
        }
    }

    #[test]
    fn test_wormhole_support() {
        let registry = ChainRegistry::new(NetworkMode::Mainnet);
        assert!(registry.is_wormhole_supported(Chain::Solana));
        assert!(registry.is_wormhole_supported(Chain::Ethereum));
        assert!(registry.is_wormhole_supported(Chain::Base));
        assert!(registry.is_wormhole_supported(Chain::Arbitrum));
        assert!(registry.is_wormhole_supported(Chain::Polygon));
        assert!(!registry.is_wormhole_supported(Chain::Lux));
        assert!(!registry.is_wormhole_supported(Chain::Bitcoin));
    }

    #[test]
    fn test_wormhole_chain_ids() {
        let registry = ChainRegistry::new(NetworkMode::Mainnet);
        assert_eq!(registry.wormhole_chain_id(Chain::Solana).unwrap(), 1);
        assert_eq!(registry.wormhole_chain_id(Chain::Ethereum).unwrap(), 2);
        assert_eq!(registry.wormhole_chain_id(Chain::Polygon).unwrap(), 5);
        assert_eq!(registry.wormhole_chain_id(Chain::Arbitrum).unwrap(), 23);
        assert_eq!(registry.wormhole_chain_id(Chain::Base).unwrap(), 30);
        assert!(registry.wormhole_chain_id(Chain::Lux).is_err());
    }

    #[test]
    fn test_min_amounts_follow_decimals() {
        let registry = ChainRegistry::new(NetworkMode::Mainnet);
        assert_eq!(registry.min_bridge_amount(Chain::Solana), 1_000_000_000);
        assert_eq!(
            registry.min_bridge_amount(Chain::Ethereum),
            1_000_000_000_000_000_000
        );
        assert_eq!(registry.min_bridge_amount(Chain::Bitcoin), 100_000_000);
    }

    #[test]
    fn test_testnet_overrides() {
        let registry = ChainRegistry::new(NetworkMode::Testnet);
        let eth = registry.config_for(Chain::Ethereum).unwrap();
        assert_eq!(eth.chain_id, 11155111);
        // Decimals and Wormhole wiring are mode-independent.
        assert_eq!(eth.decimals, 18);
        assert_eq!(eth.wormhole_chain_id, Some(2));
    }
}
