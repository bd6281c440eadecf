//! Error types for bridge operations.

use thiserror::Error;

use crate::types::{Chain, TransferStatus};

/// Errors that can occur during bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Chain value missing from the registry (defensive; the chain enum is
    /// closed and the registry covers all of it).
    #[error("Chain not in registry: {0}")]
    UnknownChain(Chain),

    /// No protocol can carry a hop of the planned route.
    #[error("No bridge protocol for {from} -> {to}")]
    UnsupportedRoute {
        /// Origin of the uncarryable hop.
        from: Chain,
        /// Destination of the uncarryable hop.
        to: Chain,
    },

    /// Requested amount below the per-chain floor.
    #[error("Amount below minimum: min {minimum}, got {amount}")]
    BelowMinimumAmount {
        /// Minimum amount for the source chain, in smallest units.
        minimum: u128,
        /// Requested amount.
        amount: u128,
    },

    /// Verified message not observed within the retry budget.
    #[error("No VAA observed after {attempts} attempts for sequence {sequence}")]
    AttestationTimeout {
        /// Number of attempts made.
        attempts: u32,
        /// Sequence number that was polled.
        sequence: u64,
    },

    /// Binary attestation payload shorter than its declared header implies.
    #[error("Malformed VAA: {0}")]
    MalformedMessage(String),

    /// Recipient address not valid for the target chain.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// Transfer parameters failed validation.
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    /// Transfer id not found in the tracked store.
    #[error("Transfer not found: {0}")]
    TransferNotFound(String),

    /// Status transition that would move the lifecycle backwards or out of a
    /// terminal state.
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current status.
        from: TransferStatus,
        /// Rejected target status.
        to: TransferStatus,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
