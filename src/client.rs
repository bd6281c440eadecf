//! MIGA bridge client.
//!
//! The client plans routes, composes quotes and tracks transfer lifecycles.
//! It never holds keys and never submits transactions; source and target
//! transactions are signed by an external wallet layer, which reports
//! hashes back through the `record_*` methods.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::attestation::GuardianClient;
use crate::chains::ChainRegistry;
use crate::config::{FeeSchedule, GuardianConfig};
use crate::error::{BridgeError, BridgeResult};
use crate::quote::QuoteComposer;
use crate::route::RoutePlanner;
use crate::types::{
    BridgeQuote, Chain, NetworkMode, Route, TransferIntent, TransferParams, TransferStatus,
    TransferStatusResult, UnsignedTransfer, VerifiedMessage,
};

/// Default number of guardian polling rounds before giving up.
pub const DEFAULT_ATTESTATION_ATTEMPTS: u32 = 30;

/// Default delay between guardian polling rounds, in milliseconds.
pub const DEFAULT_ATTESTATION_DELAY_MS: u64 = 5_000;

/// Internal tracked state for one transfer.
#[derive(Clone, Debug)]
struct TrackedTransfer {
    intent: TransferIntent,
    target_tx_hash: Option<String>,
    vaa_bytes: Option<Vec<u8>>,
    error: Option<String>,
}

/// Bridge client for one source/target chain pair.
///
/// Tracked transfers live in an in-process map that grows without bound;
/// persistence and eviction belong to the embedding application.
pub struct MigaBridge {
    source_chain: Chain,
    target_chain: Chain,
    registry: ChainRegistry,
    schedule: FeeSchedule,
    guardian: GuardianClient,
    transfers: Arc<RwLock<HashMap<String, TrackedTransfer>>>,
}

impl MigaBridge {
    /// Create a client for a chain pair in the given network mode.
    pub fn new(source_chain: Chain, target_chain: Chain, mode: NetworkMode) -> Self {
        Self {
            source_chain,
            target_chain,
            registry: ChainRegistry::new(mode),
            schedule: FeeSchedule::default(),
            guardian: GuardianClient::new(GuardianConfig::for_mode(mode)),
            transfers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mainnet client.
    pub fn mainnet(source_chain: Chain, target_chain: Chain) -> Self {
        Self::new(source_chain, target_chain, NetworkMode::Mainnet)
    }

    /// Create a testnet client.
    pub fn testnet(source_chain: Chain, target_chain: Chain) -> Self {
        Self::new(source_chain, target_chain, NetworkMode::Testnet)
    }

    /// Replace the fee/time schedule.
    pub fn with_schedule(mut self, schedule: FeeSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the guardian client.
    pub fn with_guardian_client(mut self, guardian: GuardianClient) -> Self {
        self.guardian = guardian;
        self
    }

    /// Source chain of this client.
    pub fn source_chain(&self) -> Chain {
        self.source_chain
    }

    /// Target chain of this client.
    pub fn target_chain(&self) -> Chain {
        self.target_chain
    }

    /// Chain registry backing this client.
    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Plan the route for this client's chain pair.
    pub fn get_route(&self) -> Route {
        RoutePlanner::new(&self.registry, &self.schedule).plan(self.source_chain, self.target_chain)
    }

    /// Quote a transfer of `amount` source-chain smallest units.
    ///
    /// Quoting is pure: equal inputs always produce equal quotes.
    pub fn get_quote(&self, amount: u128) -> BridgeResult<BridgeQuote> {
        let minimum = self.registry.min_bridge_amount(self.source_chain);
        if amount < minimum {
            return Err(BridgeError::BelowMinimumAmount { minimum, amount });
        }

        let route = self.get_route();
        QuoteComposer::new(&self.registry, &self.schedule).compose(&route, amount)
    }

    /// Create and track a transfer intent.
    ///
    /// Validates the parameters and stores the intent as `Pending`. No
    /// transaction is built or submitted.
    pub async fn create_transfer_intent(
        &self,
        params: &TransferParams,
    ) -> BridgeResult<TransferIntent> {
        self.validate_params(params)?;

        let intent = TransferIntent {
            id: generate_transfer_id(),
            source_chain: self.source_chain,
            target_chain: self.target_chain,
            source_tx_hash: String::new(),
            amount: params.amount,
            recipient: params.recipient.clone(),
            status: TransferStatus::Pending,
            created_at: now_millis(),
        };

        info!(
            id = %intent.id,
            source = %self.source_chain,
            target = %self.target_chain,
            amount = params.amount,
            "Created transfer intent"
        );

        let mut transfers = self.transfers.write().await;
        transfers.insert(
            intent.id.clone(),
            TrackedTransfer {
                intent: intent.clone(),
                target_tx_hash: None,
                vaa_bytes: None,
                error: None,
            },
        );

        Ok(intent)
    }

    /// Build the unsigned transfer handed to the external wallet layer.
    pub fn unsigned_transfer(&self, params: &TransferParams) -> BridgeResult<UnsignedTransfer> {
        self.validate_params(params)?;

        let source_config = self.registry.config_for(self.source_chain)?;
        Ok(UnsignedTransfer {
            target_chain: self.target_chain,
            recipient: params.recipient.clone(),
            amount: params.amount,
            bridge_address: source_config.bridge_address.clone(),
        })
    }

    /// Look up the status of a tracked transfer.
    pub async fn get_transfer_status(&self, id: &str) -> BridgeResult<TransferStatusResult> {
        let transfers = self.transfers.read().await;
        let tracked = transfers
            .get(id)
            .ok_or_else(|| BridgeError::TransferNotFound(id.to_string()))?;

        Ok(TransferStatusResult {
            id: tracked.intent.id.clone(),
            status: tracked.intent.status,
            source_chain: tracked.intent.source_chain,
            target_chain: tracked.intent.target_chain,
            source_tx_hash: tracked.intent.source_tx_hash.clone(),
            target_tx_hash: tracked.target_tx_hash.clone(),
            vaa_bytes: tracked.vaa_bytes.clone(),
            error: tracked.error.clone(),
        })
    }

    /// Record the source-chain transaction reported by the wallet layer.
    pub async fn record_source_tx(&self, id: &str, tx_hash: &str) -> BridgeResult<()> {
        self.transition(id, TransferStatus::SourceConfirmed, |tracked| {
            tracked.intent.source_tx_hash = tx_hash.to_string();
        })
        .await
    }

    /// Record an observed guardian attestation.
    pub async fn record_attested(&self, id: &str, vaa_bytes: Vec<u8>) -> BridgeResult<()> {
        self.transition(id, TransferStatus::Attested, |tracked| {
            tracked.vaa_bytes = Some(vaa_bytes);
        })
        .await
    }

    /// Mark a transfer redeemable on the target chain.
    pub async fn record_redeemable(&self, id: &str) -> BridgeResult<()> {
        self.transition(id, TransferStatus::Redeemable, |_| {}).await
    }

    /// Record the target-chain redemption transaction.
    pub async fn record_completed(&self, id: &str, target_tx_hash: &str) -> BridgeResult<()> {
        self.transition(id, TransferStatus::Completed, |tracked| {
            tracked.target_tx_hash = Some(target_tx_hash.to_string());
        })
        .await
    }

    /// Mark a transfer failed with an error message.
    pub async fn record_failure(&self, id: &str, error: &str) -> BridgeResult<()> {
        self.transition(id, TransferStatus::Failed, |tracked| {
            tracked.error = Some(error.to_string());
        })
        .await
    }

    /// Wait for the guardian attestation of a source-chain event.
    ///
    /// Polls with the default retry budget. `emitter_address` is the bridge
    /// emitter on this client's source chain.
    pub async fn wait_for_attestation(
        &self,
        emitter_address: &str,
        sequence: u64,
    ) -> BridgeResult<VerifiedMessage> {
        let emitter_chain = self.registry.wormhole_chain_id(self.source_chain)?;
        self.guardian
            .fetch_signed_vaa_with_retry(
                emitter_chain,
                emitter_address,
                sequence,
                DEFAULT_ATTESTATION_ATTEMPTS,
                Duration::from_millis(DEFAULT_ATTESTATION_DELAY_MS),
            )
            .await
    }

    /// Check whether a signed attestation is already available.
    pub async fn is_redeemable(
        &self,
        emitter_chain: u16,
        emitter_address: &str,
        sequence: u64,
    ) -> BridgeResult<bool> {
        let vaa = self
            .guardian
            .fetch_signed_vaa(emitter_chain, emitter_address, sequence)
            .await?;
        Ok(vaa.is_some())
    }

    /// Apply a forward-only status transition.
    async fn transition(
        &self,
        id: &str,
        to: TransferStatus,
        apply: impl FnOnce(&mut TrackedTransfer),
    ) -> BridgeResult<()> {
        let mut transfers = self.transfers.write().await;
        let tracked = transfers
            .get_mut(id)
            .ok_or_else(|| BridgeError::TransferNotFound(id.to_string()))?;

        let from = tracked.intent.status;
        if from.is_terminal() || to.rank() <= from.rank() {
            return Err(BridgeError::InvalidTransition { from, to });
        }

        tracked.intent.status = to;
        apply(tracked);

        debug!(id, from = ?from, to = ?to, "Transfer status advanced");
        Ok(())
    }

    fn validate_params(&self, params: &TransferParams) -> BridgeResult<()> {
        if self.source_chain == self.target_chain {
            return Err(BridgeError::InvalidTransfer(
                "source and target chains must differ".to_string(),
            ));
        }

        let minimum = self.registry.min_bridge_amount(self.source_chain);
        if params.amount < minimum {
            return Err(BridgeError::BelowMinimumAmount {
                minimum,
                amount: params.amount,
            });
        }

        if !recipient_valid_for(self.target_chain, &params.recipient) {
            return Err(BridgeError::InvalidRecipient(format!(
                "{} is not a valid {} address",
                params.recipient, self.target_chain
            )));
        }

        if let Some(deadline) = params.deadline {
            if deadline <= now_millis() / 1_000 {
                return Err(BridgeError::InvalidTransfer(
                    "deadline must be in the future".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Shallow per-chain address shape check.
fn recipient_valid_for(chain: Chain, address: &str) -> bool {
    match chain {
        Chain::Solana => {
            (32..=44).contains(&address.len())
                && address.bytes().all(|b| {
                    b.is_ascii_alphanumeric() && !matches!(b, b'0' | b'O' | b'I' | b'l')
                })
        }
        Chain::Bitcoin => {
            (26..=62).contains(&address.len())
                && (address.starts_with("bc1")
                    || address.starts_with("tb1")
                    || address.starts_with('1')
                    || address.starts_with('3'))
        }
        // Remaining chains are EVM compatible.
        _ => {
            address.len() == 42
                && address.starts_with("0x")
                && address[2..].bytes().all(|b| b.is_ascii_hexdigit())
        }
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate an opaque transfer id: timestamp plus random suffix.
fn generate_transfer_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("miga-{:x}-{}", now_millis(), suffix)
}
