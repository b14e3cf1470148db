//! DynDNS update bridge
//!
//! The UpdateBridge is responsible for:
//! - Authenticating router credentials
//! - Validating the requested hostname and addresses
//! - Resolving the hostname to a zone and record name
//! - Updating the matching record, or creating it
//!
//! ## Request Flow
//!
//! ```text
//! Unauthenticated ──auth──▶ Validated ──list_zones──▶ Resolved
//!        │                     │                         │
//!        ▼                     ▼                   list_records
//!   401 challenge       400 / offline "good"             │
//!                                                        ▼
//!                          Responded ◀── update/create ── Applied
//!                      "good ..." or "911"
//! ```
//!
//! IPv4 and IPv6 are independent lanes, applied in that order. The first
//! failing lane aborts the request; the router then only sees `911`.

pub mod request;

pub use request::{
    UpdateParams, UpdateReply, UpdateRequest, UpdateSummary, ValidatedRequest,
};

use crate::config::{BridgeConfig, Credentials};
use crate::error::{Error, Result};
use crate::resolve::{find_record, resolve_zone};
use crate::traits::DnsProvider;
use crate::types::{CreateRecordRequest, RecordType, UpdateRecordRequest};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// TTL given to records the bridge creates
pub const DEFAULT_RECORD_TTL: u32 = 3600;

/// Result of applying one address lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// An existing record was rewritten
    Updated {
        /// ID of the rewritten record
        record_id: String,
        /// Value the record held before
        previous_value: String,
        /// The new IP address
        new_ip: IpAddr,
    },
    /// No record existed; one was created
    Created {
        /// ID assigned by the provider
        record_id: String,
        /// The created IP address
        new_ip: IpAddr,
    },
}

/// Translates DynDNS update calls into provider API calls
///
/// Holds no mutable state: every request re-reads zones and records from the
/// provider, so one instance can serve concurrent requests behind an `Arc`.
pub struct UpdateBridge {
    /// Provider holding the zones
    provider: Arc<dyn DnsProvider>,

    /// Credentials routers must present
    credentials: Credentials,
}

impl UpdateBridge {
    /// Create a new bridge
    pub fn new(provider: Arc<dyn DnsProvider>, credentials: Credentials) -> Self {
        Self {
            provider,
            credentials,
        }
    }

    /// Create a bridge from a validated configuration
    pub fn from_config(provider: Arc<dyn DnsProvider>, config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(provider, config.credentials.clone()))
    }

    /// Check presented Basic-Auth credentials
    pub fn authenticate(&self, presented: Option<&Credentials>) -> Result<()> {
        match presented {
            Some(creds) if self.credentials.matches(&creds.username, &creds.password) => Ok(()),
            Some(creds) => Err(Error::auth(format!(
                "invalid credentials for user '{}'",
                creds.username
            ))),
            None => Err(Error::auth("no credentials presented")),
        }
    }

    /// Handle one DynDNS update call end to end
    ///
    /// Never fails: every error is folded into the reply the router sees.
    pub async fn handle(
        &self,
        presented: Option<&Credentials>,
        params: &UpdateParams,
    ) -> UpdateReply {
        if let Err(e) = self.authenticate(presented) {
            warn!("Rejected update request: {}", e);
            return UpdateReply::Unauthorized;
        }

        let request = match params.validate() {
            Ok(ValidatedRequest::Update(request)) => request,
            Ok(ValidatedRequest::Offline { hostname }) => {
                info!("Offline request for {} - nothing to do", hostname);
                return UpdateReply::Good(UpdateSummary::default());
            }
            Err(e) => {
                warn!("Invalid update request: {}", e);
                return UpdateReply::BadRequest(e);
            }
        };

        // Lane failures are logged in apply(); the router only gets the token
        match self.apply(&request).await {
            Ok(summary) => UpdateReply::Good(summary),
            Err(_) => UpdateReply::RemoteFailure,
        }
    }

    /// Apply the address lanes of a validated request, IPv4 first
    pub async fn apply(&self, request: &UpdateRequest) -> Result<UpdateSummary> {
        let mut summary = UpdateSummary::default();

        if let Some(ip) = request.ipv4 {
            if let Err(e) = self.update_dns_record(&request.hostname, IpAddr::V4(ip)).await {
                error!("Failed to update IPv4 DNS record: {}", e);
                return Err(e);
            }
            info!("Successfully updated {} A record to {}", request.hostname, ip);
            summary.ipv4 = Some(ip);
        }

        if let Some(ip) = request.ipv6 {
            if let Err(e) = self.update_dns_record(&request.hostname, IpAddr::V6(ip)).await {
                error!("Failed to update IPv6 DNS record: {}", e);
                return Err(e);
            }
            info!("Successfully updated {} AAAA record to {}", request.hostname, ip);
            summary.ipv6 = Some(ip);
        }

        Ok(summary)
    }

    /// Point `hostname` at `ip`, updating the matching record or creating one
    ///
    /// The record type follows the address family. An existing record keeps
    /// its TTL; a new one gets [`DEFAULT_RECORD_TTL`].
    pub async fn update_dns_record(&self, hostname: &str, ip: IpAddr) -> Result<UpdateResult> {
        let record_type = RecordType::for_ip(ip);

        let zones = self
            .provider
            .list_zones()
            .await
            .map_err(|e| self.step_error("failed to get zones", e))?;

        let target = resolve_zone(hostname, &zones)?;
        debug!(
            "Found zone: {} (ID: {}) for hostname: {}, record name: {}",
            target.zone.name, target.zone.id, hostname, target.record_name
        );

        let records = self
            .provider
            .list_records(&target.zone.id)
            .await
            .map_err(|e| self.step_error("failed to get records", e))?;

        if let Some(existing) = find_record(&records, &target.record_name, record_type) {
            let request = UpdateRecordRequest {
                record_type: record_type.as_str().to_string(),
                name: target.record_name.clone(),
                value: ip.to_string(),
                ttl: existing.ttl,
                zone_id: target.zone.id.clone(),
            };
            debug!("Updating record {}: {:?}", existing.id, request);

            self.provider
                .update_record(&existing.id, &request)
                .await
                .map_err(|e| self.step_error("failed to update record", e))?;

            info!(
                "Updated existing record {} ({}) from {} to {}",
                existing.id, record_type, existing.value, ip
            );
            return Ok(UpdateResult::Updated {
                record_id: existing.id.clone(),
                previous_value: existing.value.clone(),
                new_ip: ip,
            });
        }

        let request = CreateRecordRequest {
            record_type: record_type.as_str().to_string(),
            name: target.record_name.clone(),
            value: ip.to_string(),
            ttl: Some(DEFAULT_RECORD_TTL),
            zone_id: target.zone.id.clone(),
        };
        debug!("Creating record: {:?}", request);

        let created = self
            .provider
            .create_record(&request)
            .await
            .map_err(|e| self.step_error("failed to create record", e))?;

        info!(
            "Created new record {} {} -> {}",
            record_type, target.record_name, ip
        );
        Ok(UpdateResult::Created {
            record_id: created.id,
            new_ip: ip,
        })
    }

    /// Wrap a provider failure with the step that produced it
    fn step_error(&self, step: &str, err: Error) -> Error {
        Error::provider(self.provider.provider_name(), format!("{}: {}", step, err))
    }
}

impl std::fmt::Debug for UpdateBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateBridge")
            .field("provider", &self.provider.provider_name())
            .field("credentials", &self.credentials)
            .finish()
    }
}
