//! Update request parsing and reply formatting
//!
//! [`UpdateParams`] is the raw query of a DynDNS update call. Validation turns
//! it into a [`ValidatedRequest`]; the bridge answers with an [`UpdateReply`].

use serde::Deserialize;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::ValidationError;
use crate::resolve::{is_valid_ipv4, is_valid_ipv6};

/// Status token for a successful update
pub const GOOD: &str = "good";

/// Status token for a failure after the provider was contacted
pub const REMOTE_FAILURE: &str = "911";

/// Raw query parameters of `/update`
///
/// Empty values are treated like absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateParams {
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub myip: Option<String>,
    #[serde(default)]
    pub myipv6: Option<String>,
    #[serde(default)]
    pub offline: Option<String>,
}

/// A validated address update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub hostname: String,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

/// Outcome of validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedRequest {
    /// Router reported the host offline; answered without provider calls
    Offline { hostname: String },
    /// At least one address family must be applied
    Update(UpdateRequest),
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl UpdateParams {
    /// Build from decoded query pairs
    ///
    /// The first value of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "hostname" => &mut params.hostname,
                "myip" => &mut params.myip,
                "myipv6" => &mut params.myipv6,
                "offline" => &mut params.offline,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    /// Validate in router-contract order: hostname, offline flag, IPv4, IPv6,
    /// at least one address.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let hostname = non_empty(&self.hostname).ok_or(ValidationError::MissingHostname)?;

        if non_empty(&self.offline) == Some("yes") {
            return Ok(ValidatedRequest::Offline {
                hostname: hostname.to_string(),
            });
        }

        let ipv4 = match non_empty(&self.myip) {
            Some(value) if is_valid_ipv4(value) => Some(
                value
                    .parse::<Ipv4Addr>()
                    .map_err(|_| ValidationError::InvalidIpv4)?,
            ),
            Some(_) => return Err(ValidationError::InvalidIpv4),
            None => None,
        };

        let ipv6 = match non_empty(&self.myipv6) {
            Some(value) if is_valid_ipv6(value) => Some(
                value
                    .parse::<Ipv6Addr>()
                    .map_err(|_| ValidationError::InvalidIpv6)?,
            ),
            Some(_) => return Err(ValidationError::InvalidIpv6),
            None => None,
        };

        if ipv4.is_none() && ipv6.is_none() {
            return Err(ValidationError::NoAddress);
        }

        Ok(ValidatedRequest::Update(UpdateRequest {
            hostname: hostname.to_string(),
            ipv4,
            ipv6,
        }))
    }
}

/// Which address families were applied, in IPv4-then-IPv6 order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(GOOD)?;

        let mut parts = Vec::with_capacity(2);
        if let Some(ip) = self.ipv4 {
            parts.push(format!("IPv4: {}", ip));
        }
        if let Some(ip) = self.ipv6 {
            parts.push(format!("IPv6: {}", ip));
        }

        if !parts.is_empty() {
            write!(f, " {}", parts.join(", "))?;
        }
        Ok(())
    }
}

/// Reply to a DynDNS update call, independent of the HTTP framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateReply {
    /// 200 with `good ...`
    Good(UpdateSummary),
    /// 401 with a Basic challenge
    Unauthorized,
    /// 400 with the validation message
    BadRequest(ValidationError),
    /// 200 with `911`
    RemoteFailure,
}

impl UpdateReply {
    /// HTTP status code of the reply
    pub fn status_code(&self) -> u16 {
        match self {
            UpdateReply::Good(_) | UpdateReply::RemoteFailure => 200,
            UpdateReply::Unauthorized => 401,
            UpdateReply::BadRequest(_) => 400,
        }
    }

    /// Plain-text body of the reply
    pub fn body(&self) -> String {
        match self {
            UpdateReply::Good(summary) => summary.to_string(),
            UpdateReply::Unauthorized => "Unauthorized".to_string(),
            UpdateReply::BadRequest(err) => err.to_string(),
            UpdateReply::RemoteFailure => REMOTE_FAILURE.to_string(),
        }
    }
}
