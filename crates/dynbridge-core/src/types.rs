// # Wire Types
//
// JSON schemas of the zone-management REST API (Hetzner DNS API v1 shape).
//
// These are fixed external contracts. Zone metadata the bridge never reads
// is still modelled so it passes through unchanged, and every metadata field
// defaults when absent or `null` so a minimal `{"id": ..., "name": ...}` zone
// decodes.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::IpAddr;

/// A DNS record as stored by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record ID (provider-assigned)
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    /// Record type ("A", "AAAA", "MX", ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Name relative to the zone; `"@"` is the apex
    pub name: String,

    /// Record value (the address for A/AAAA)
    pub value: String,

    /// Time-to-live in seconds; `None` means the zone default applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub zone_id: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub created: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub modified: String,
}

/// TXT verification challenge attached to a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtVerification {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
}

/// A DNS zone managed by the provider
///
/// Only `id` and `name` are used by the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ttl: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub registrar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_dns_host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_ns: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ns: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub permission: String,
    /// Zone plan descriptor; kept opaque
    pub zone_type: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paused: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_secondary_dns: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub txt_verification: TxtVerification,
    #[serde(deserialize_with = "null_as_default")]
    pub records_count: u32,
}

impl Zone {
    /// Create a zone with only identity fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Pagination block of a zone listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub per_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub previous_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub next_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub last_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_entries: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonesMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

/// Response envelope of `GET /zones`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub zones: Vec<Zone>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ZonesMeta,
}

/// Response envelope of `GET /records?zone_id=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub records: Vec<DnsRecord>,
}

/// Response envelope of single-record calls (get, create, update)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub record: DnsRecord,
}

/// Body of `POST /records`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub zone_id: String,
}

/// Body of `PUT /records/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub zone_id: String,
}

/// Error detail inside the provider's error envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: i64,
}

/// Error envelope returned with non-2xx responses: `{"error": {"message", "code"}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// Decode `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Address record type managed by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// A record (IPv4)
    A,
    /// AAAA record (IPv6)
    Aaaa,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Record type that carries the given address
    pub fn for_ip(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::Aaaa,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_round_trip_keeps_ttl() {
        let record = DnsRecord {
            id: "test123".to_string(),
            record_type: "A".to_string(),
            name: "test".to_string(),
            value: "192.168.1.1".to_string(),
            ttl: Some(3600),
            zone_id: "zone123".to_string(),
            created: "2023-01-01T00:00:00Z".to_string(),
            modified: "2023-01-02T00:00:00Z".to_string(),
        };

        let data = serde_json::to_string(&record).unwrap();
        let decoded: DnsRecord = serde_json::from_str(&data).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn absent_ttl_differs_from_zero_ttl() {
        let mut record = DnsRecord {
            record_type: "A".to_string(),
            name: "test".to_string(),
            value: "1.2.3.4".to_string(),
            ..DnsRecord::default()
        };

        let absent = serde_json::to_value(&record).unwrap();
        assert!(absent.get("ttl").is_none());
        assert_eq!(serde_json::from_value::<DnsRecord>(absent).unwrap().ttl, None);

        record.ttl = Some(0);
        let zero = serde_json::to_value(&record).unwrap();
        assert_eq!(zero["ttl"], json!(0));
        assert_eq!(serde_json::from_value::<DnsRecord>(zero).unwrap().ttl, Some(0));
    }

    #[test]
    fn record_omits_empty_identity_fields() {
        let record = DnsRecord {
            record_type: "AAAA".to_string(),
            name: "@".to_string(),
            value: "2001:db8::1".to_string(),
            ..DnsRecord::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"type": "AAAA", "name": "@", "value": "2001:db8::1"})
        );
    }

    #[test]
    fn zone_decodes_full_provider_payload() {
        let payload = json!({
            "id": "zone123",
            "name": "example.com",
            "ttl": 86400,
            "registrar": "Example Registrar",
            "legacy_dns_host": "old.dns.host",
            "legacy_ns": ["ns1.legacy.com", "ns2.legacy.com"],
            "ns": ["hydrogen.ns.hetzner.com", "oxygen.ns.hetzner.com"],
            "created": "2023-01-01 00:00:00.000 +0000 UTC",
            "verified": "2023-01-01 00:00:00.000 +0000 UTC",
            "modified": "2023-01-02 00:00:00.000 +0000 UTC",
            "project": "default",
            "owner": "owner",
            "permission": "rw",
            "zone_type": {"id": "ignored"},
            "status": "verified",
            "paused": false,
            "is_secondary_dns": false,
            "txt_verification": {"name": "_verify", "token": "abc"},
            "records_count": 7
        });

        let zone: Zone = serde_json::from_value(payload).unwrap();
        assert_eq!(zone.zone_type, json!({"id": "ignored"}));
        assert_eq!(zone.ns.len(), 2);
        assert_eq!(zone.txt_verification.token, "abc");
        assert_eq!(zone.records_count, 7);

        let again: Zone = serde_json::from_value(serde_json::to_value(&zone).unwrap()).unwrap();
        assert_eq!(again, zone);
    }

    #[test]
    fn minimal_zone_listing_decodes() {
        let resp: ZonesResponse =
            serde_json::from_value(json!({"zones": [{"id": "z1", "name": "example.com"}]}))
                .unwrap();
        assert_eq!(resp.zones, vec![Zone::new("z1", "example.com")]);
        assert_eq!(resp.meta.pagination, Pagination::default());
    }

    #[test]
    fn null_metadata_decodes_as_default() {
        let resp: ZonesResponse = serde_json::from_str(
            r#"{"zones":[{"id":"z1","name":"example.com","legacy_ns":null,"registrar":null,
                "ttl":null,"paused":null,"txt_verification":null,"zone_type":null}],
                "meta":{"pagination":{"page":1,"previous_page":null}}}"#,
        )
        .unwrap();
        assert_eq!(resp.zones, vec![Zone::new("z1", "example.com")]);
        assert_eq!(resp.meta.pagination.page, 1);
        assert_eq!(resp.meta.pagination.previous_page, 0);

        let resp: ZonesResponse =
            serde_json::from_str(r#"{"zones":null,"meta":null}"#).unwrap();
        assert!(resp.zones.is_empty());

        let resp: RecordsResponse = serde_json::from_str(
            r#"{"records":[{"id":"r1","type":"A","name":"home","value":"1.2.3.4",
                "ttl":null,"zone_id":"z1","created":null,"modified":null}]}"#,
        )
        .unwrap();
        assert_eq!(resp.records[0].ttl, None);
        assert_eq!(resp.records[0].created, "");
    }

    #[test]
    fn request_bodies_round_trip() {
        let create = CreateRecordRequest {
            record_type: "A".to_string(),
            name: "test".to_string(),
            value: "1.2.3.4".to_string(),
            ttl: None,
            zone_id: "zone123".to_string(),
        };
        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(
            value,
            json!({"type": "A", "name": "test", "value": "1.2.3.4", "zone_id": "zone123"})
        );
        assert_eq!(
            serde_json::from_value::<CreateRecordRequest>(value).unwrap(),
            create
        );

        let update = UpdateRecordRequest {
            record_type: "AAAA".to_string(),
            name: "@".to_string(),
            value: "::1".to_string(),
            ttl: Some(0),
            zone_id: "zone123".to_string(),
        };
        let text = serde_json::to_string(&update).unwrap();
        assert_eq!(
            serde_json::from_str::<UpdateRecordRequest>(&text).unwrap(),
            update
        );
    }

    #[test]
    fn error_envelope_round_trip() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":{"message":"Invalid request","code":400}}"#)
                .unwrap();
        assert_eq!(body.error.message, "Invalid request");
        assert_eq!(body.error.code, 400);

        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(serde_json::from_str::<ApiErrorBody>(&text).unwrap(), body);
    }

    #[test]
    fn record_type_follows_address_family() {
        assert_eq!(RecordType::for_ip("1.2.3.4".parse().unwrap()), RecordType::A);
        assert_eq!(RecordType::for_ip("::1".parse().unwrap()), RecordType::Aaaa);
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
    }
}
