//! Cross-chain bridge engine for the MIGA token.
//!
//! Plans routes, quotes fees and times, and tracks transfer lifecycles
//! across Solana, Ethereum, Base, Arbitrum, Polygon, Lux and Bitcoin.
//! Three protocols carry hops:
//!
//! - Wormhole for guardian-attested transfers between supported chains
//! - Lux Bridge for the Ethereum <-> Lux gateway
//! - Zeus Network for Bitcoin settlement via Solana
//!
//! The engine is custody-free: it plans and tracks, while an external
//! wallet layer signs and submits transactions.
//!
//! # Example
//!
//! ```no_run
//! use miga_bridge::{Chain, MigaBridge};
//!
//! let bridge = MigaBridge::mainnet(Chain::Solana, Chain::Ethereum);
//! let quote = bridge.get_quote(2_000_000_000)?;
//! assert_eq!(quote.fee, 0);
//! # Ok::<(), miga_bridge::BridgeError>(())
//! ```

pub mod attestation;
pub mod chains;
pub mod client;
pub mod config;
pub mod error;
pub mod protocols;
pub mod quote;
pub mod route;
pub mod types;

pub use attestation::{parse_vaa, GuardianClient, GuardianTransport, HttpGuardianTransport, ParsedVaa};
pub use chains::{ChainConfig, ChainRegistry, NativeCurrency};
pub use client::{MigaBridge, DEFAULT_ATTESTATION_ATTEMPTS, DEFAULT_ATTESTATION_DELAY_MS};
pub use config::{FeeSchedule, GuardianConfig};
pub use error::{BridgeError, BridgeResult};
pub use protocols::{HopQuote, ProtocolAdapter};
pub use quote::QuoteComposer;
pub use route::RoutePlanner;
pub use types::{
    BridgeProtocol, BridgeQuote, Chain, NetworkMode, Route, RouteHop, TransferIntent,
    TransferParams, TransferStatus, TransferStatusResult, UnsignedTransfer, VerifiedMessage,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
