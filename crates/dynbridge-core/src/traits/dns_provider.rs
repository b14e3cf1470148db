// # DNS Provider Trait
//
// Defines the interface of a remote zone-management API.
//
// ## Implementations
//
// - Hetzner DNS: `dynbridge-provider-hetzner` crate
//
// ## Usage
//
// ```rust,ignore
// use dynbridge_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     for zone in provider.list_zones().await? {
//         let records = provider.list_records(&zone.id).await?;
//         println!("{}: {} records", zone.name, records.len());
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::types::{CreateRecordRequest, DnsRecord, UpdateRecordRequest, Zone};

/// Trait for DNS provider implementations
///
/// A thin typed wrapper over the provider's REST API. Each method maps to
/// exactly one HTTP call.
///
/// # Thread Safety
///
/// Implementations must be thread-safe; one instance serves all concurrent
/// update requests.
///
/// # Constraints
///
/// Providers are stateless and single-shot:
/// - No retry or backoff. A failed call returns an error and the request
///   that triggered it fails.
/// - No caching of zones or records across calls.
/// - No background tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List all zones visible to the configured API key, in provider order
    async fn list_zones(&self) -> Result<Vec<Zone>, crate::Error>;

    /// List all records of a zone, in provider order
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Fetch a single record by ID
    async fn get_record(&self, record_id: &str) -> Result<DnsRecord, crate::Error>;

    /// Create a record, returning it as stored by the provider
    async fn create_record(
        &self,
        request: &CreateRecordRequest,
    ) -> Result<DnsRecord, crate::Error>;

    /// Replace an existing record, returning it as stored by the provider
    async fn update_record(
        &self,
        record_id: &str,
        request: &UpdateRecordRequest,
    ) -> Result<DnsRecord, crate::Error>;

    /// Delete a record by ID
    async fn delete_record(&self, record_id: &str) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
