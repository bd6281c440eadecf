//! Quote composition over planned routes.
//!
//! The composer walks a route hop by hop, feeding each hop's output amount
//! into the next hop, and sums fees and times. Fees are accumulated in
//! source-chain smallest units without cross-chain conversion; per-hop fees
//! therefore compound, since later hops see an already-reduced amount.

use tracing::debug;

use crate::chains::ChainRegistry;
use crate::config::FeeSchedule;
use crate::error::{BridgeError, BridgeResult};
use crate::protocols::quote_hop;
use crate::types::{BridgeQuote, Route};

/// Composes a [`BridgeQuote`] from a planned route.
pub struct QuoteComposer<'a> {
    registry: &'a ChainRegistry,
    schedule: &'a FeeSchedule,
}

impl<'a> QuoteComposer<'a> {
    /// Create a composer over the given registry and schedule.
    pub fn new(registry: &'a ChainRegistry, schedule: &'a FeeSchedule) -> Self {
        Self { registry, schedule }
    }

    /// Quote moving `amount` along `route`.
    ///
    /// Fails with [`BridgeError::UnsupportedRoute`] when any hop carries no
    /// protocol. The quote's `protocol` field is the first hop's protocol.
    pub fn compose(&self, route: &Route, amount: u128) -> BridgeResult<BridgeQuote> {
        let (first, last) = match (route.first(), route.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(BridgeError::InvalidTransfer("empty route".to_string())),
        };

        let source_chain = first.from;
        let target_chain = last.to;

        let primary_protocol = first
            .protocol
            .ok_or(BridgeError::UnsupportedRoute {
                from: first.from,
                to: first.to,
            })?;

        let mut running_amount = amount;
        let mut total_fee: u128 = 0;
        let mut total_time_secs: u64 = 0;

        for hop in route {
            let protocol = hop.protocol.ok_or(BridgeError::UnsupportedRoute {
                from: hop.from,
                to: hop.to,
            })?;

            let hop_quote =
                quote_hop(self.registry, self.schedule, protocol, hop.from, hop.to, running_amount)?;

            debug!(
                from = %hop.from,
                to = %hop.to,
                %protocol,
                fee = hop_quote.fee,
                output = hop_quote.output_amount,
                "Quoted hop"
            );

            total_fee += hop_quote.fee;
            total_time_secs += hop_quote.estimated_time_secs;
            running_amount = hop_quote.output_amount;
        }

        let fee_token = self
            .registry
            .config_for(source_chain)?
            .native_currency
            .symbol
            .clone();

        Ok(BridgeQuote {
            source_chain,
            target_chain,
            input_amount: amount,
            estimated_output: running_amount,
            fee: total_fee,
            fee_token,
            estimated_time_secs: total_time_secs,
            route: route.clone(),
            protocol: primary_protocol,
        })
    }
}
