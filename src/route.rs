//! Route planning across bridge protocols.
//!
//! Planning is pure and deterministic: no network calls, no clock. Protocol
//! resolution failures are deferred to quote time, so the planner always
//! returns a structurally valid route.

use crate::chains::ChainRegistry;
use crate::config::FeeSchedule;
use crate::types::{BridgeProtocol, Chain, Route, RouteHop};

/// Pivot chain for routes touching Lux.
const LUX_PIVOT: Chain = Chain::Ethereum;

/// Pivot chain for routes touching Bitcoin (Zeus Network settles there).
const BITCOIN_PIVOT: Chain = Chain::Solana;

/// Plans multi-hop bridge routes between chains.
pub struct RoutePlanner<'a> {
    registry: &'a ChainRegistry,
    schedule: &'a FeeSchedule,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner over the given registry and schedule.
    pub fn new(registry: &'a ChainRegistry, schedule: &'a FeeSchedule) -> Self {
        Self { registry, schedule }
    }

    /// Plan the route from `source` to `target`.
    ///
    /// Wormhole is always preferred when both endpoints support it, even when
    /// a shorter nominal path exists via another protocol: it is the only
    /// protocol with zero intrinsic fee.
    pub fn plan(&self, source: Chain, target: Chain) -> Route {
        // Direct Wormhole route.
        if self.registry.is_wormhole_supported(source)
            && self.registry.is_wormhole_supported(target)
        {
            return vec![self.hop(source, target)];
        }

        // Lux is only reachable through its Ethereum gateway.
        if target == Chain::Lux {
            if source == LUX_PIVOT {
                return vec![self.hop(source, target)];
            }
            if self.registry.is_wormhole_supported(source) {
                return vec![self.hop(source, LUX_PIVOT), self.hop(LUX_PIVOT, target)];
            }
        }
        if source == Chain::Lux {
            if target == LUX_PIVOT {
                return vec![self.hop(source, target)];
            }
            if self.registry.is_wormhole_supported(target) {
                return vec![self.hop(source, LUX_PIVOT), self.hop(LUX_PIVOT, target)];
            }
        }

        // Bitcoin settles through Solana via Zeus Network.
        if source == Chain::Bitcoin {
            if target == BITCOIN_PIVOT {
                return vec![self.hop(source, target)];
            }
            if self.registry.is_wormhole_supported(target) {
                return vec![
                    self.hop(source, BITCOIN_PIVOT),
                    self.hop(BITCOIN_PIVOT, target),
                ];
            }
        }
        if target == Chain::Bitcoin {
            if source == BITCOIN_PIVOT {
                return vec![self.hop(source, target)];
            }
            if self.registry.is_wormhole_supported(source) {
                return vec![
                    self.hop(source, BITCOIN_PIVOT),
                    self.hop(BITCOIN_PIVOT, target),
                ];
            }
        }

        // No protocol rule connects the pair. Return the structurally valid
        // direct hop with no protocol; quoting rejects it.
        vec![RouteHop {
            from: source,
            to: target,
            protocol: None,
            estimated_time_secs: 0,
        }]
    }

    fn hop(&self, from: Chain, to: Chain) -> RouteHop {
        let protocol = self.resolve_protocol(from, to);
        let estimated_time_secs = protocol
            .map(|p| self.hop_time(p, from, to))
            .unwrap_or(0);
        RouteHop {
            from,
            to,
            protocol,
            estimated_time_secs,
        }
    }

    /// Resolve the protocol carrying a single hop, if any.
    fn resolve_protocol(&self, from: Chain, to: Chain) -> Option<BridgeProtocol> {
        if self.registry.is_wormhole_supported(from) && self.registry.is_wormhole_supported(to) {
            return Some(BridgeProtocol::Wormhole);
        }
        match (from, to) {
            (Chain::Lux, c) | (c, Chain::Lux) if c == LUX_PIVOT => Some(BridgeProtocol::LuxBridge),
            (Chain::Bitcoin, c) | (c, Chain::Bitcoin) if c == BITCOIN_PIVOT => {
                Some(BridgeProtocol::ZeusNetwork)
            }
            _ => None,
        }
    }

    fn hop_time(&self, protocol: BridgeProtocol, from: Chain, to: Chain) -> u64 {
        match protocol {
            BridgeProtocol::Wormhole => {
                let from_evm = self.registry.is_evm(from);
                let to_evm = self.registry.is_evm(to);
                if !from_evm && to_evm {
                    self.schedule.wormhole_solana_to_evm_secs
                } else if from_evm && !to_evm {
                    self.schedule.wormhole_evm_to_solana_secs
                } else {
                    self.schedule.wormhole_evm_to_evm_secs
                }
            }
            BridgeProtocol::LuxBridge => self.schedule.lux_bridge_secs,
            BridgeProtocol::ZeusNetwork => self.schedule.zeus_network_secs,
        }
    }
}
