//! Injected fee/time schedules and guardian endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::types::NetworkMode;

/// Fee rates and fixed hop durations per protocol.
///
/// Loaded once and passed explicitly so tests can substitute alternate
/// schedules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Lux Bridge fee in basis points.
    pub lux_bridge_fee_bps: u128,
    /// Zeus Network fee in basis points.
    pub zeus_network_fee_bps: u128,
    /// Wormhole hop time, non-EVM source to EVM target (seconds).
    pub wormhole_solana_to_evm_secs: u64,
    /// Wormhole hop time, EVM source to non-EVM target (seconds).
    pub wormhole_evm_to_solana_secs: u64,
    /// Wormhole hop time, EVM to EVM (seconds).
    pub wormhole_evm_to_evm_secs: u64,
    /// Lux Bridge hop time (seconds).
    pub lux_bridge_secs: u64,
    /// Zeus Network hop time (seconds); dominated by Bitcoin finality.
    pub zeus_network_secs: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            lux_bridge_fee_bps: 10,
            zeus_network_fee_bps: 25,
            wormhole_solana_to_evm_secs: 60 * 15,
            wormhole_evm_to_solana_secs: 60 * 15,
            wormhole_evm_to_evm_secs: 60 * 20,
            lux_bridge_secs: 60 * 10,
            zeus_network_secs: 60 * 60,
        }
    }
}

/// Guardian RPC endpoint list, queried in declared order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Ordered guardian RPC hosts.
    pub hosts: Vec<String>,
}

impl GuardianConfig {
    /// Default guardian hosts for a network mode.
    pub fn for_mode(mode: NetworkMode) -> Self {
        let hosts = match mode {
            NetworkMode::Mainnet => vec![
                "https://wormhole-v2-mainnet-api.certus.one".to_string(),
                "https://wormhole.inotel.ro".to_string(),
                "https://wormhole-v2-mainnet-api.mcf.rocks".to_string(),
                "https://wormhole-v2-mainnet-api.chainlayer.network".to_string(),
                "https://wormhole-v2-mainnet-api.staking.fund".to_string(),
            ],
            NetworkMode::Testnet => vec![
                "https://wormhole-v2-testnet-api.certus.one".to_string(),
            ],
        };
        Self { hosts }
    }
}
