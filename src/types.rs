//! Core types for MIGA bridge operations.

use serde::{Deserialize, Serialize};

/// Supported chain identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    /// Solana mainnet/devnet.
    Solana,
    /// Ethereum mainnet/Sepolia.
    Ethereum,
    /// Base mainnet/Sepolia.
    Base,
    /// Arbitrum One/Sepolia.
    Arbitrum,
    /// Polygon PoS/Amoy.
    Polygon,
    /// Lux network.
    Lux,
    /// Bitcoin (Runes via Zeus Network).
    Bitcoin,
}

impl Chain {
    /// All supported chains.
    pub const ALL: [Chain; 7] = [
        Chain::Solana,
        Chain::Ethereum,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Polygon,
        Chain::Lux,
        Chain::Bitcoin,
    ];

    /// Human-readable chain name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Solana => "Solana",
            Self::Ethereum => "Ethereum",
            Self::Base => "Base",
            Self::Arbitrum => "Arbitrum",
            Self::Polygon => "Polygon",
            Self::Lux => "Lux",
            Self::Bitcoin => "Bitcoin",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Network mode selecting between production and test configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkMode {
    /// Production networks.
    Mainnet,
    /// Test networks (devnet/Sepolia/Amoy).
    Testnet,
}

/// Protocol carrying a single bridge hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BridgeProtocol {
    /// Wormhole guardian-attested token bridge.
    Wormhole,
    /// Lux gateway bridge (Ethereum <-> Lux).
    LuxBridge,
    /// Zeus Network settlement (Bitcoin <-> Solana).
    ZeusNetwork,
}

impl std::fmt::Display for BridgeProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Wormhole => "Wormhole",
            Self::LuxBridge => "Lux Bridge",
            Self::ZeusNetwork => "Zeus Network",
        };
        write!(f, "{}", name)
    }
}

/// One leg of a planned bridge route.
///
/// `protocol` is `None` when no protocol connects the pair; such a hop is
/// structurally valid but rejected when quoted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHop {
    /// Origin chain of this hop.
    pub from: Chain,
    /// Destination chain of this hop.
    pub to: Chain,
    /// Protocol carrying the hop, if one resolves.
    pub protocol: Option<BridgeProtocol>,
    /// Estimated time for this hop in seconds.
    pub estimated_time_secs: u64,
}

/// Ordered sequence of hops from a source chain to a target chain.
pub type Route = Vec<RouteHop>;

/// Quote for a bridge transfer along a planned route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeQuote {
    /// Source chain.
    pub source_chain: Chain,
    /// Target chain.
    pub target_chain: Chain,
    /// Input amount in source-chain smallest units.
    pub input_amount: u128,
    /// Estimated output in target-chain smallest units.
    pub estimated_output: u128,
    /// Total fee, accumulated in source-chain smallest units.
    pub fee: u128,
    /// Symbol the fee is denominated in (source-chain native currency).
    pub fee_token: String,
    /// Total estimated time in seconds (sum of hop times).
    pub estimated_time_secs: u64,
    /// The hops composing this quote.
    pub route: Route,
    /// Primary protocol (protocol of the first hop).
    pub protocol: BridgeProtocol,
}

/// Parameters for initiating a transfer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferParams {
    /// Amount in source-chain smallest units.
    pub amount: u128,
    /// Recipient address on the target chain.
    pub recipient: String,
    /// Optional deadline (Unix seconds).
    pub deadline: Option<u64>,
}

/// Lifecycle status of a transfer.
///
/// Statuses only move forward; `Failed` is reachable from any non-terminal
/// state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Intent created, source transaction not yet submitted.
    Pending,
    /// Source-chain transaction confirmed (reported externally).
    SourceConfirmed,
    /// Guardian attestation observed.
    Attested,
    /// Attested and not yet redeemed on the target chain.
    Redeemable,
    /// Redemption confirmed on the target chain.
    Completed,
    /// Unrecoverable failure.
    Failed,
}

impl TransferStatus {
    /// Position in the forward-only lifecycle.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::SourceConfirmed => 1,
            Self::Attested => 2,
            Self::Redeemable => 3,
            Self::Completed => 4,
            Self::Failed => 5,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => "Pending submission",
            Self::SourceConfirmed => "Source transaction confirmed",
            Self::Attested => "Guardian attestation observed",
            Self::Redeemable => "Ready to redeem on target chain",
            Self::Completed => "Transfer completed",
            Self::Failed => "Transfer failed",
        }
    }
}

/// A tracked, user-initiated transfer.
///
/// The bridge never signs or submits transactions; `source_tx_hash` stays
/// empty until the external wallet layer reports one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferIntent {
    /// Opaque unique identifier.
    pub id: String,
    /// Source chain.
    pub source_chain: Chain,
    /// Target chain.
    pub target_chain: Chain,
    /// Source transaction hash, empty until submitted.
    pub source_tx_hash: String,
    /// Amount in source-chain smallest units.
    pub amount: u128,
    /// Recipient address on the target chain.
    pub recipient: String,
    /// Current lifecycle status.
    pub status: TransferStatus,
    /// Creation timestamp (Unix milliseconds).
    pub created_at: u64,
}

/// Status snapshot returned by transfer lookups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferStatusResult {
    /// Transfer identifier.
    pub id: String,
    /// Current status.
    pub status: TransferStatus,
    /// Source chain.
    pub source_chain: Chain,
    /// Target chain.
    pub target_chain: Chain,
    /// Source transaction hash (empty until submitted).
    pub source_tx_hash: String,
    /// Target transaction hash, once redeemed.
    pub target_tx_hash: Option<String>,
    /// Raw VAA bytes, once attested.
    pub vaa_bytes: Option<Vec<u8>>,
    /// Error message if failed.
    pub error: Option<String>,
}

/// Unsigned-transaction-shaped data handed to the external wallet layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransfer {
    /// Destination chain for the transfer.
    pub target_chain: Chain,
    /// Recipient address on the target chain.
    pub recipient: String,
    /// Amount in source-chain smallest units.
    pub amount: u128,
    /// Bridge contract the wallet should call on the source chain.
    pub bridge_address: Option<String>,
}

/// A guardian-signed message confirming a source-chain event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedMessage {
    /// Raw VAA bytes as fetched.
    pub bytes: Vec<u8>,
    /// Per-emitter sequence number.
    pub sequence: u64,
    /// Wormhole chain id of the emitter.
    pub emitter_chain: u16,
    /// Emitter address (hex).
    pub emitter_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(TransferStatus::Pending.rank() < TransferStatus::SourceConfirmed.rank());
        assert!(TransferStatus::SourceConfirmed.rank() < TransferStatus::Attested.rank());
        assert!(TransferStatus::Attested.rank() < TransferStatus::Redeemable.rank());
        assert!(TransferStatus::Redeemable.rank() < TransferStatus::Completed.rank());
    }

    #[test]
    fn test_terminal_states() {
        assert!(TransferStatus::Completed.is_terminal());
        assert!(TransferStatus::Failed.is_terminal());
        assert!(!TransferStatus::Redeemable.is_terminal());
        assert!(!TransferStatus::Pending.is_terminal());
    }

    #[test]
    fn test_chain_display() {
        assert_eq!(Chain::Solana.to_string(), "Solana");
        assert_eq!(Chain::Lux.to_string(), "Lux");
        assert_eq!(Chain::ALL.len(), 7);
    }
}
