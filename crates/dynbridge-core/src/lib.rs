// # dynbridge-core
//
// Core library of the DynDNS to Hetzner DNS bridge.
//
// ## Architecture Overview
//
// This library provides everything except the network edges:
// - **DnsProvider**: Trait for typed access to a zone-management REST API
// - **UpdateBridge**: Turns a DynDNS update call into provider calls
// - **resolve**: Hostname → (zone, record name) resolution
// - **types**: Wire schemas of the provider API
//
// The HTTP client lives in `dynbridge-provider-hetzner`; the HTTP server
// lives in the `dynbridged` daemon.
//
// ## Design Principles
//
// 1. **Stateless**: Every update re-reads zones and records from the provider
// 2. **Single-shot**: No retries, no caching, no background tasks
// 3. **Explicit configuration**: Config structs are passed to constructors;
//    nothing reads the environment here

pub mod bridge;
pub mod config;
pub mod error;
pub mod resolve;
pub mod traits;
pub mod types;

// Re-export core types for convenience
pub use bridge::{UpdateBridge, UpdateParams, UpdateReply, UpdateResult, UpdateSummary};
pub use config::{BridgeConfig, Credentials, ProviderConfig, ServerConfig};
pub use error::{Error, Result, ValidationError};
pub use traits::DnsProvider;
pub use types::{
    CreateRecordRequest, DnsRecord, RecordType, UpdateRecordRequest, Zone,
};
