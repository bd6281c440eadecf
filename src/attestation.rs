//! Guardian attestation (VAA) retrieval and parsing.
//!
//! The guardian network is queried through an ordered list of redundant RPC
//! hosts. Fan-out is sequential with first-success-wins semantics: this
//! bounds load on guardian infrastructure and keeps ordering deterministic.
//! Individual endpoint failures are swallowed and converted into "try next
//! endpoint"; only total exhaustion yields an empty result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GuardianConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::types::VerifiedMessage;

/// Byte length of one guardian signature entry (index + r + s + v).
const SIGNATURE_LEN: usize = 66;

/// Bytes preceding the signature block: version(1) + guardian set index(4)
/// + signature count(1).
const SIG_BLOCK_OFFSET: usize = 6;

/// Bytes of the body header after the signature block: timestamp(4) +
/// nonce(4) + emitter chain(2) + emitter address(32) + sequence(8) +
/// consistency level(1).
const BODY_HEADER_LEN: usize = 51;

/// Decoded VAA header and payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVaa {
    /// Wormhole chain id of the emitter.
    pub emitter_chain: u16,
    /// Emitter address, lowercase hex.
    pub emitter_address: String,
    /// Per-emitter sequence number.
    pub sequence: u64,
    /// Application payload (everything after the header).
    pub payload: Vec<u8>,
}

/// Parse a binary VAA.
///
/// Layout (big-endian multi-byte fields):
/// version(1) | guardian set index(4) | signature count(1) |
/// signatures(count x 66) | timestamp(4) | nonce(4) | emitter chain(2) |
/// emitter address(32) | sequence(8) | consistency level(1) | payload.
pub fn parse_vaa(bytes: &[u8]) -> BridgeResult<ParsedVaa> {
    if bytes.len() < SIG_BLOCK_OFFSET {
        return Err(BridgeError::MalformedMessage(format!(
            "buffer too short for signature count: {} bytes",
            bytes.len()
        )));
    }

    let sig_count = usize::from(bytes[5]);
    let header_len = SIG_BLOCK_OFFSET + sig_count * SIGNATURE_LEN + BODY_HEADER_LEN;
    if bytes.len() < header_len {
        return Err(BridgeError::MalformedMessage(format!(
            "buffer shorter than header: {} < {} ({} signatures)",
            bytes.len(),
            header_len,
            sig_count
        )));
    }

    // Skip signatures, timestamp and nonce.
    let mut offset = SIG_BLOCK_OFFSET + sig_count * SIGNATURE_LEN + 8;

    let emitter_chain = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
    offset += 2;

    let emitter_address = hex::encode(&bytes[offset..offset + 32]);
    offset += 32;

    // Sequence reconstructed from two 32-bit big-endian halves.
    let high = u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]);
    let low = u32::from_be_bytes([
        bytes[offset + 4],
        bytes[offset + 5],
        bytes[offset + 6],
        bytes[offset + 7],
    ]);
    let sequence = (u64::from(high) << 32) | u64::from(low);
    offset += 8;

    // Skip consistency level.
    offset += 1;

    Ok(ParsedVaa {
        emitter_chain,
        emitter_address,
        sequence,
        payload: bytes[offset..].to_vec(),
    })
}

/// Transport seam for querying one guardian host.
///
/// `Ok(None)` means the host answered but has no well-formed VAA yet;
/// `Err` means the host could not be reached. Both make the client move on
/// to the next host.
#[async_trait]
pub trait GuardianTransport: Send + Sync {
    /// Fetch the signed VAA bytes from a single host, if available.
    async fn fetch_signed_vaa(
        &self,
        host: &str,
        emitter_chain: u16,
        emitter_address: &str,
        sequence: u64,
    ) -> BridgeResult<Option<Vec<u8>>>;
}

/// HTTP transport against guardian REST endpoints.
pub struct HttpGuardianTransport {
    http: reqwest::Client,
}

impl HttpGuardianTransport {
    /// Create an HTTP transport with a fresh client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpGuardianTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GuardianTransport for HttpGuardianTransport {
    async fn fetch_signed_vaa(
        &self,
        host: &str,
        emitter_chain: u16,
        emitter_address: &str,
        sequence: u64,
    ) -> BridgeResult<Option<Vec<u8>>> {
        let url = format!(
            "{}/v1/signed_vaa/{}/{}/{}",
            host, emitter_chain, emitter_address, sequence
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body: serde_json::Value = response.json().await?;
        let encoded = match body.get("vaaBytes").and_then(|v| v.as_str()) {
            Some(s) => s,
            None => return Ok(None),
        };

        match base64::engine::general_purpose::STANDARD.decode(encoded) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) => {
                debug!(host, %err, "Guardian returned undecodable vaaBytes");
                Ok(None)
            }
        }
    }
}

/// Client over the ordered guardian host list.
pub struct GuardianClient {
    hosts: Vec<String>,
    transport: Arc<dyn GuardianTransport>,
}

impl GuardianClient {
    /// Create a client using the HTTP transport.
    pub fn new(config: GuardianConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpGuardianTransport::new()))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: GuardianConfig, transport: Arc<dyn GuardianTransport>) -> Self {
        Self {
            hosts: config.hosts,
            transport,
        }
    }

    /// Fetch a signed VAA, trying each host in declared order.
    ///
    /// Returns `Ok(None)` only after every host has been tried without a
    /// well-formed response.
    pub async fn fetch_signed_vaa(
        &self,
        emitter_chain: u16,
        emitter_address: &str,
        sequence: u64,
    ) -> BridgeResult<Option<VerifiedMessage>> {
        for host in &self.hosts {
            match self
                .transport
                .fetch_signed_vaa(host, emitter_chain, emitter_address, sequence)
                .await
            {
                Ok(Some(bytes)) => {
                    debug!(host, sequence, "Fetched signed VAA");
                    return Ok(Some(VerifiedMessage {
                        bytes,
                        sequence,
                        emitter_chain,
                        emitter_address: emitter_address.to_string(),
                    }));
                }
                Ok(None) => {
                    debug!(host, sequence, "Guardian has no VAA yet");
                }
                Err(err) => {
                    warn!(host, %err, "Guardian host unreachable, trying next");
                }
            }
        }

        Ok(None)
    }

    /// Poll for a signed VAA, sleeping `delay` between rounds.
    ///
    /// Fails with [`BridgeError::AttestationTimeout`] after `max_attempts`
    /// empty rounds. Each round is read-only, so cancelling the returned
    /// future leaves no partial state behind.
    pub async fn fetch_signed_vaa_with_retry(
        &self,
        emitter_chain: u16,
        emitter_address: &str,
        sequence: u64,
        max_attempts: u32,
        delay: Duration,
    ) -> BridgeResult<VerifiedMessage> {
        for attempt in 1..=max_attempts {
            if let Some(vaa) = self
                .fetch_signed_vaa(emitter_chain, emitter_address, sequence)
                .await?
            {
                info!(sequence, attempt, "VAA observed");
                return Ok(vaa);
            }

            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(BridgeError::AttestationTimeout {
            attempts: max_attempts,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Builds a syntactically valid VAA with the given header fields.
    fn build_vaa(
        sig_count: u8,
        emitter_chain: u16,
        emitter_address: [u8; 32],
        sequence: u64,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.push(1); // version
        bytes.extend_from_slice(&3u32.to_be_bytes()); // guardian set index
        bytes.push(sig_count);
        bytes.extend(std::iter::repeat(0xaa).take(usize::from(sig_count) * SIGNATURE_LEN));
        bytes.extend_from_slice(&1_700_000_000u32.to_be_bytes()); // timestamp
        bytes.extend_from_slice(&42u32.to_be_bytes()); // nonce
        bytes.extend_from_slice(&emitter_chain.to_be_bytes());
        bytes.extend_from_slice(&emitter_address);
        bytes.extend_from_slice(&sequence.to_be_bytes());
        bytes.push(1); // consistency level
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_parse_vaa_roundtrip() {
        let emitter = [0xabu8; 32];
        let bytes = build_vaa(13, 1, emitter, 0x0000_0001_0000_0002, b"transfer");

        let parsed = parse_vaa(&bytes).unwrap();
        assert_eq!(parsed.emitter_chain, 1);
        assert_eq!(parsed.emitter_address, hex::encode(emitter));
        assert_eq!(parsed.sequence, 0x0000_0001_0000_0002);
        assert_eq!(parsed.payload, b"transfer");
    }

    #[test]
    fn test_parse_vaa_large_sequence() {
        let bytes = build_vaa(1, 23, [0u8; 32], u64::MAX - 7, &[]);
        let parsed = parse_vaa(&bytes).unwrap();
        assert_eq!(parsed.sequence, u64::MAX - 7);
        assert!(parsed.payload.is_empty());
    }

    #[test]
    fn test_parse_vaa_rejects_short_buffer() {
        // Declares 13 signatures but carries none.
        let mut bytes = vec![1];
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.push(13);
        let err = parse_vaa(&bytes).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedMessage(_)));

        assert!(matches!(
            parse_vaa(&[1, 0]).unwrap_err(),
            BridgeError::MalformedMessage(_)
        ));
    }

    /// Transport double that records host order, fails the first
    /// `failures` hosts and answers empty for the next `empties`.
    struct ScriptedTransport {
        calls: Mutex<Vec<String>>,
        failures: usize,
        empties: usize,
        vaa: Vec<u8>,
    }

    #[async_trait]
    impl GuardianTransport for ScriptedTransport {
        async fn fetch_signed_vaa(
            &self,
            host: &str,
            _emitter_chain: u16,
            _emitter_address: &str,
            _sequence: u64,
        ) -> BridgeResult<Option<Vec<u8>>> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(host.to_string());
            if calls.len() <= self.failures {
                Err(BridgeError::Network("connection refused".into()))
            } else if calls.len() <= self.failures + self.empties {
                Ok(None)
            } else {
                Ok(Some(self.vaa.clone()))
            }
        }
    }

    fn three_hosts() -> GuardianConfig {
        GuardianConfig {
            hosts: vec![
                "https://guardian-a".to_string(),
                "https://guardian-b".to_string(),
                "https://guardian-c".to_string(),
            ],
        }
    }

    #[tokio::test]
    async fn test_fetch_tries_hosts_in_order() {
        let transport = Arc::new(ScriptedTransport {
            calls: Mutex::new(Vec::new()),
            failures: 2,
            empties: 0,
            vaa: vec![1, 2, 3],
        });
        let client = GuardianClient::with_transport(three_hosts(), transport.clone());

        let vaa = client.fetch_signed_vaa(1, "abcd", 7).await.unwrap().unwrap();
        assert_eq!(vaa.bytes, vec![1, 2, 3]);
        assert_eq!(vaa.sequence, 7);

        let calls = transport.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec!["https://guardian-a", "https://guardian-b", "https://guardian-c"]
        );
    }

    #[tokio::test]
    async fn test_fetch_stops_at_first_success() {
        let transport = Arc::new(ScriptedTransport {
            calls: Mutex::new(Vec::new()),
            failures: 0,
            empties: 0,
            vaa: vec![9],
        });
        let client = GuardianClient::with_transport(three_hosts(), transport.clone());

        client.fetch_signed_vaa(1, "abcd", 7).await.unwrap().unwrap();
        assert_eq!(transport.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_returns_none_on_exhaustion() {
        let transport = Arc::new(ScriptedTransport {
            calls: Mutex::new(Vec::new()),
            failures: usize::MAX,
            empties: 0,
            vaa: Vec::new(),
        });
        let client = GuardianClient::with_transport(three_hosts(), transport.clone());

        let result = client.fetch_signed_vaa(1, "abcd", 7).await.unwrap();
        assert!(result.is_none());
        assert_eq!(transport.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_skips_hosts_without_vaa() {
        // First host unreachable, second answers without a usable VAA.
        let transport = Arc::new(ScriptedTransport {
            calls: Mutex::new(Vec::new()),
            failures: 1,
            empties: 1,
            vaa: vec![7, 7],
        });
        let client = GuardianClient::with_transport(three_hosts(), transport.clone());

        let vaa = client.fetch_signed_vaa(2, "abcd", 11).await.unwrap().unwrap();
        assert_eq!(vaa.bytes, vec![7, 7]);
        assert_eq!(
            *transport.calls.lock().unwrap(),
            vec!["https://guardian-a", "https://guardian-b", "https://guardian-c"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_times_out() {
        let transport = Arc::new(ScriptedTransport {
            calls: Mutex::new(Vec::new()),
            failures: usize::MAX,
            empties: 0,
            vaa: Vec::new(),
        });
        let client = GuardianClient::with_transport(three_hosts(), transport);

        let err = client
            .fetch_signed_vaa_with_retry(1, "abcd", 7, 3, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::AttestationTimeout { attempts: 3, sequence: 7 }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_returns_once_observed() {
        // Fails the first full round (3 hosts), succeeds on the second.
        let transport = Arc::new(ScriptedTransport {
            calls: Mutex::new(Vec::new()),
            failures: 3,
            empties: 0,
            vaa: vec![5, 5],
        });
        let client = GuardianClient::with_transport(three_hosts(), transport);

        let vaa = client
            .fetch_signed_vaa_with_retry(1, "abcd", 9, 5, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(vaa.bytes, vec![5, 5]);
    }
}
