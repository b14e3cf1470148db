// # Hetzner DNS Provider
//
// This crate provides the Hetzner DNS API v1 client for the bridge.
//
// ## Behaviour
//
// - One HTTP request per trait call
// - `Auth-API-Token` header on every request
// - HTTP timeout configured (30 seconds)
// - Non-2xx responses decode the `{"error": {"message", "code"}}` envelope;
//   when that fails the raw status and body text are kept instead
// - A 2xx body that does not decode is an error, never a partial result
// - No retry, no backoff, no caching
//
// ## Security Requirements
//
// - API key NEVER appears in logs
// - API key NEVER appears in `Debug` output

use async_trait::async_trait;
use dynbridge_core::config::{DEFAULT_HETZNER_API_URL, ProviderConfig};
use dynbridge_core::traits::DnsProvider;
use dynbridge_core::types::{
    ApiErrorBody, CreateRecordRequest, DnsRecord, RecordResponse, RecordsResponse,
    UpdateRecordRequest, Zone, ZonesResponse,
};
use dynbridge_core::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key
const API_TOKEN_HEADER: &str = "Auth-API-Token";

/// Hetzner DNS API client
///
/// Stateless; a single instance is shared by all update requests.
pub struct HetznerClient {
    /// Hetzner DNS API token
    /// ⚠️ NEVER log this value
    api_key: String,

    /// API base URL without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for HetznerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HetznerClient")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HetznerClient {
    /// Create a client for the public Hetzner DNS API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_HETZNER_API_URL)
    }

    /// Create a client against a custom base URL
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the API key is empty
    /// - `Error::Http` if the HTTP client cannot be built
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Hetzner DNS API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create a client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        match config {
            ProviderConfig::Hetzner { api_key, base_url } => Self::with_base_url(
                api_key.clone(),
                base_url.as_deref().unwrap_or(DEFAULT_HETZNER_API_URL),
            ),
        }
    }

    /// API base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request for `endpoint` (path relative to the base URL)
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, endpoint))
            .header(API_TOKEN_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Attach a JSON body
    fn with_json<B: Serialize>(request: RequestBuilder, body: &B) -> Result<RequestBuilder> {
        Ok(request.body(serde_json::to_vec(body)?))
    }

    /// Send a request and return the body of a 2xx response
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<String> {
        tracing::debug!("Executing request to '{}'", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to '{}' failed: {}", endpoint, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(body)
    }

    /// Send a request and decode the 2xx body
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<T> {
        let body = self.send(request, endpoint).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Failed to decode response from '{}': {}", endpoint, e);
            Error::from(e)
        })
    }
}

/// Map a non-2xx response to an error
fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            tracing::warn!("Error from API: '{}' using body '{}'", status, body);
            Error::api(status, Some(parsed.error.code), parsed.error.message)
        }
        Err(_) => Error::api(
            status,
            None,
            format!("API request failed with status {}: {}", status, body),
        ),
    }
}

#[async_trait]
impl DnsProvider for HetznerClient {
    /// ```http
    /// GET /zones
    /// ```
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let endpoint = "/zones";
        let response: ZonesResponse = self
            .fetch(self.request(Method::GET, endpoint), endpoint)
            .await?;
        Ok(response.zones)
    }

    /// ```http
    /// GET /records?zone_id=:zone_id
    /// ```
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let endpoint = "/records";
        let request = self
            .request(Method::GET, endpoint)
            .query(&[("zone_id", zone_id)]);
        let response: RecordsResponse = self.fetch(request, endpoint).await?;
        Ok(response.records)
    }

    /// ```http
    /// GET /records/:record_id
    /// ```
    async fn get_record(&self, record_id: &str) -> Result<DnsRecord> {
        let endpoint = format!("/records/{}", record_id);
        let response: RecordResponse = self
            .fetch(self.request(Method::GET, &endpoint), &endpoint)
            .await?;
        Ok(response.record)
    }

    /// ```http
    /// POST /records
    /// {"type": "A", "name": "home", "value": "1.2.3.4", "ttl": 3600, "zone_id": "..."}
    /// ```
    async fn create_record(&self, request: &CreateRecordRequest) -> Result<DnsRecord> {
        let endpoint = "/records";
        let builder = Self::with_json(self.request(Method::POST, endpoint), request)?;
        let response: RecordResponse = self.fetch(builder, endpoint).await?;
        Ok(response.record)
    }

    /// ```http
    /// PUT /records/:record_id
    /// {"type": "A", "name": "home", "value": "1.2.3.4", "zone_id": "..."}
    /// ```
    async fn update_record(
        &self,
        record_id: &str,
        request: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let endpoint = format!("/records/{}", record_id);
        let builder = Self::with_json(self.request(Method::PUT, &endpoint), request)?;
        let response: RecordResponse = self.fetch(builder, &endpoint).await?;
        Ok(response.record)
    }

    /// ```http
    /// DELETE /records/:record_id
    /// ```
    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let endpoint = format!("/records/{}", record_id);
        self.send(self.request(Method::DELETE, &endpoint), &endpoint)
            .await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "hetzner"
    }
}
