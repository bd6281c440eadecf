//! Per-protocol hop quoting.
//!
//! Each adapter quotes exactly one hop: fee, estimated time and output
//! amount. Wormhole charges no intrinsic fee but rescales amounts across
//! decimal precisions; the gateway and settlement protocols charge flat
//! basis-point fees in the hop's input units.

use serde::{Deserialize, Serialize};

use crate::chains::ChainRegistry;
use crate::config::FeeSchedule;
use crate::error::{BridgeError, BridgeResult};
use crate::types::{BridgeProtocol, Chain};

/// Basis-point denominator.
const BPS_DENOMINATOR: u128 = 10_000;

/// Quote for a single hop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopQuote {
    /// Fee charged by the hop, in the hop's input units.
    pub fee: u128,
    /// Estimated time for the hop in seconds.
    pub estimated_time_secs: u64,
    /// Output amount, in the hop's output units.
    pub output_amount: u128,
}

/// Quotes a single hop for one bridge protocol.
pub trait ProtocolAdapter {
    /// Quote moving `amount` from `from` to `to` over this protocol.
    fn quote_hop(&self, from: Chain, to: Chain, amount: u128) -> BridgeResult<HopQuote>;
}

/// Adapter for the Wormhole guardian-attested bridge.
pub struct WormholeAdapter<'a> {
    registry: &'a ChainRegistry,
    schedule: &'a FeeSchedule,
}

impl<'a> WormholeAdapter<'a> {
    /// Create a Wormhole adapter.
    pub fn new(registry: &'a ChainRegistry, schedule: &'a FeeSchedule) -> Self {
        Self { registry, schedule }
    }
}

impl ProtocolAdapter for WormholeAdapter<'_> {
    fn quote_hop(&self, from: Chain, to: Chain, amount: u128) -> BridgeResult<HopQuote> {
        if !self.registry.is_wormhole_supported(from) || !self.registry.is_wormhole_supported(to) {
            return Err(BridgeError::UnsupportedRoute { from, to });
        }

        let from_decimals = self.registry.decimals(from)?;
        let to_decimals = self.registry.decimals(to)?;

        // Rescale across decimal precisions so real-world value is preserved.
        let output_amount = if from_decimals > to_decimals {
            amount / 10u128.pow(u32::from(from_decimals - to_decimals))
        } else {
            amount
                .checked_mul(10u128.pow(u32::from(to_decimals - from_decimals)))
                .ok_or_else(|| {
                    BridgeError::InvalidTransfer("amount too large to rescale".to_string())
                })?
        };

        let from_evm = self.registry.is_evm(from);
        let to_evm = self.registry.is_evm(to);
        let estimated_time_secs = if !from_evm && to_evm {
            self.schedule.wormhole_solana_to_evm_secs
        } else if from_evm && !to_evm {
            self.schedule.wormhole_evm_to_solana_secs
        } else {
            self.schedule.wormhole_evm_to_evm_secs
        };

        // Wormhole charges no protocol fee, only external relayer gas.
        Ok(HopQuote {
            fee: 0,
            estimated_time_secs,
            output_amount,
        })
    }
}

/// Adapter for the Lux gateway bridge.
pub struct LuxBridgeAdapter<'a> {
    schedule: &'a FeeSchedule,
}

impl<'a> LuxBridgeAdapter<'a> {
    /// Create a Lux Bridge adapter.
    pub fn new(schedule: &'a FeeSchedule) -> Self {
        Self { schedule }
    }
}

impl ProtocolAdapter for LuxBridgeAdapter<'_> {
    fn quote_hop(&self, _from: Chain, _to: Chain, amount: u128) -> BridgeResult<HopQuote> {
        let fee = bps_fee(amount, self.schedule.lux_bridge_fee_bps)?;
        Ok(HopQuote {
            fee,
            estimated_time_secs: self.schedule.lux_bridge_secs,
            output_amount: amount - fee,
        })
    }
}

/// Adapter for the Zeus Network settlement layer (Bitcoin legs).
pub struct ZeusNetworkAdapter<'a> {
    schedule: &'a FeeSchedule,
}

impl<'a> ZeusNetworkAdapter<'a> {
    /// Create a Zeus Network adapter.
    pub fn new(schedule: &'a FeeSchedule) -> Self {
        Self { schedule }
    }
}

impl ProtocolAdapter for ZeusNetworkAdapter<'_> {
    fn quote_hop(&self, _from: Chain, _to: Chain, amount: u128) -> BridgeResult<HopQuote> {
        let fee = bps_fee(amount, self.schedule.zeus_network_fee_bps)?;
        Ok(HopQuote {
            fee,
            estimated_time_secs: self.schedule.zeus_network_secs,
            output_amount: amount - fee,
        })
    }
}

/// Basis-point fee with overflow surfaced instead of wrapped.
fn bps_fee(amount: u128, fee_bps: u128) -> BridgeResult<u128> {
    amount
        .checked_mul(fee_bps)
        .map(|scaled| scaled / BPS_DENOMINATOR)
        .ok_or_else(|| BridgeError::InvalidTransfer("amount too large to quote".to_string()))
}

/// Quote one hop with the adapter matching its protocol.
pub fn quote_hop(
    registry: &ChainRegistry,
    schedule: &FeeSchedule,
    protocol: BridgeProtocol,
    from: Chain,
    to: Chain,
    amount: u128,
) -> BridgeResult<HopQuote> {
    match protocol {
        BridgeProtocol::Wormhole => {
            WormholeAdapter::new(registry, schedule).quote_hop(from, to, amount)
        }
        BridgeProtocol::LuxBridge => LuxBridgeAdapter::new(schedule).quote_hop(from, to, amount),
        BridgeProtocol::ZeusNetwork => {
            ZeusNetworkAdapter::new(schedule).quote_hop(from, to, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NetworkMode;

    fn fixture() -> (ChainRegistry, FeeSchedule) {
        (ChainRegistry::new(NetworkMode::Mainnet), FeeSchedule::default())
    }

    #[test]
    fn test_wormhole_rescales_9_to_18_decimals() {
        let (registry, schedule) = fixture();
        let adapter = WormholeAdapter::new(&registry, &schedule);

        let quote = adapter
            .quote_hop(Chain::Solana, Chain::Ethereum, 2_000_000_000)
            .unwrap();
        assert_eq!(quote.output_amount, 2_000_000_000_000_000_000);
        assert_eq!(quote.fee, 0);
    }

    #[test]
    fn test_wormhole_rescales_18_to_9_decimals() {
        let (registry, schedule) = fixture();
        let adapter = WormholeAdapter::new(&registry, &schedule);

        let quote = adapter
            .quote_hop(Chain::Ethereum, Chain::Solana, 5_000_000_000_000_000_000)
            .unwrap();
        assert_eq!(quote.output_amount, 5_000_000_000);
        assert_eq!(
            quote.estimated_time_secs,
            schedule.wormhole_evm_to_solana_secs
        );
    }

    #[test]
    fn test_wormhole_same_decimals_passthrough() {
        let (registry, schedule) = fixture();
        let adapter = WormholeAdapter::new(&registry, &schedule);

        let quote = adapter
            .quote_hop(Chain::Ethereum, Chain::Base, 1_000_000_000_000_000_000)
            .unwrap();
        assert_eq!(quote.output_amount, 1_000_000_000_000_000_000);
        assert_eq!(quote.estimated_time_secs, schedule.wormhole_evm_to_evm_secs);
    }

    #[test]
    fn test_wormhole_rejects_unsupported_endpoints() {
        let (registry, schedule) = fixture();
        let adapter = WormholeAdapter::new(&registry, &schedule);

        let err = adapter
            .quote_hop(Chain::Solana, Chain::Lux, 1_000_000_000)
            .unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedRoute { .. }));
    }

    #[test]
    fn test_lux_bridge_fee() {
        let (_, schedule) = fixture();
        let adapter = LuxBridgeAdapter::new(&schedule);

        let quote = adapter
            .quote_hop(Chain::Ethereum, Chain::Lux, 1_000_000)
            .unwrap();
        // 10 bps = 0.1%
        assert_eq!(quote.fee, 1_000);
        assert_eq!(quote.output_amount, 999_000);
        assert_eq!(quote.estimated_time_secs, 600);
    }

    #[test]
    fn test_zeus_network_fee() {
        let (_, schedule) = fixture();
        let adapter = ZeusNetworkAdapter::new(&schedule);

        let quote = adapter
            .quote_hop(Chain::Bitcoin, Chain::Solana, 1_000_000)
            .unwrap();
        // 25 bps = 0.25%
        assert_eq!(quote.fee, 2_500);
        assert_eq!(quote.output_amount, 997_500);
        assert_eq!(quote.estimated_time_secs, 3600);
    }

    #[test]
    fn test_rescale_overflow_is_an_error() {
        let (registry, schedule) = fixture();
        let adapter = WormholeAdapter::new(&registry, &schedule);

        // 9 -> 18 decimals multiplies by 1e9; u128::MAX / 2 cannot take it.
        let err = adapter
            .quote_hop(Chain::Solana, Chain::Ethereum, u128::MAX / 2)
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidTransfer(_)));

        // The largest amount that still rescales is fine.
        let boundary = u128::MAX / 1_000_000_000;
        let quote = adapter
            .quote_hop(Chain::Solana, Chain::Ethereum, boundary)
            .unwrap();
        assert_eq!(quote.output_amount, boundary * 1_000_000_000);
    }

    #[test]
    fn test_bps_fee_overflow_is_an_error() {
        let (_, schedule) = fixture();

        let err = ZeusNetworkAdapter::new(&schedule)
            .quote_hop(Chain::Bitcoin, Chain::Solana, u128::MAX / 10)
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidTransfer(_)));

        let err = LuxBridgeAdapter::new(&schedule)
            .quote_hop(Chain::Ethereum, Chain::Lux, u128::MAX / 5)
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidTransfer(_)));

        // At the boundary the fee still computes.
        let boundary = u128::MAX / 25;
        let quote = ZeusNetworkAdapter::new(&schedule)
            .quote_hop(Chain::Bitcoin, Chain::Solana, boundary)
            .unwrap();
        assert_eq!(quote.fee, boundary * 25 / 10_000);
    }

    #[test]
    fn test_alternate_schedule_is_honored() {
        let schedule = FeeSchedule {
            lux_bridge_fee_bps: 100,
            ..FeeSchedule::default()
        };
        let adapter = LuxBridgeAdapter::new(&schedule);

        let quote = adapter
            .quote_hop(Chain::Ethereum, Chain::Lux, 10_000)
            .unwrap();
        assert_eq!(quote.fee, 100);
    }
}
