//! Hostname to zone/record resolution
//!
//! Both lookups are linear scans that take the first match in provider
//! order. Zone lists and record lists are small (tens of entries).
//!
//! When a hostname matches more than one zone (`example.com` and
//! `sub.example.com` both managed, hostname `x.sub.example.com`), the zone
//! the provider lists first wins. There is no longest-suffix rule.

use crate::error::{Error, Result};
use crate::types::{DnsRecord, RecordType, Zone};
use std::net::IpAddr;

/// Record name of the zone apex
pub const APEX: &str = "@";

/// A hostname resolved to its zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMatch<'a> {
    /// The zone containing the hostname
    pub zone: &'a Zone,
    /// Record name relative to the zone (`"@"` for the apex)
    pub record_name: String,
}

/// Pick the zone that contains `hostname`.
///
/// A zone matches when `hostname` equals its name (record name `"@"`) or ends
/// with `"." + name` (record name is the remaining prefix).
pub fn resolve_zone<'a>(hostname: &str, zones: &'a [Zone]) -> Result<ZoneMatch<'a>> {
    for zone in zones {
        if hostname == zone.name {
            return Ok(ZoneMatch {
                zone,
                record_name: APEX.to_string(),
            });
        }

        if let Some(prefix) = hostname.strip_suffix(zone.name.as_str())
            && let Some(label) = prefix.strip_suffix('.')
        {
            return Ok(ZoneMatch {
                zone,
                record_name: label.to_string(),
            });
        }
    }

    Err(Error::zone_not_found(hostname))
}

/// First record of `records` with the given name and type
pub fn find_record<'a>(
    records: &'a [DnsRecord],
    record_name: &str,
    record_type: RecordType,
) -> Option<&'a DnsRecord> {
    records
        .iter()
        .find(|r| r.name == record_name && r.record_type == record_type.as_str())
}

/// Whether `value` is a dotted-quad IPv4 address.
///
/// Strings containing `:` are rejected even when they parse as an address.
pub fn is_valid_ipv4(value: &str) -> bool {
    !value.contains(':') && value.parse::<IpAddr>().is_ok()
}

/// Whether `value` is a colon-delimited IPv6 address.
pub fn is_valid_ipv6(value: &str) -> bool {
    value.contains(':') && value.parse::<IpAddr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(names: &[&str]) -> Vec<Zone> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Zone::new(format!("zone{}", i + 1), *name))
            .collect()
    }

    fn record(id: &str, record_type: &str, name: &str) -> DnsRecord {
        DnsRecord {
            id: id.to_string(),
            record_type: record_type.to_string(),
            name: name.to_string(),
            value: "1.2.3.4".to_string(),
            ..DnsRecord::default()
        }
    }

    #[test]
    fn exact_match_resolves_to_apex() {
        let zones = zones(&["example.com"]);
        let m = resolve_zone("example.com", &zones).unwrap();
        assert_eq!(m.zone.id, "zone1");
        assert_eq!(m.record_name, "@");
    }

    #[test]
    fn subdomain_resolves_to_prefix() {
        let zones = zones(&["other.org", "example.com"]);
        let m = resolve_zone("home.office.example.com", &zones).unwrap();
        assert_eq!(m.zone.name, "example.com");
        assert_eq!(m.record_name, "home.office");
        assert_eq!(format!("{}.{}", m.record_name, m.zone.name), "home.office.example.com");
    }

    #[test]
    fn suffix_must_be_label_aligned() {
        let zones = zones(&["example.com"]);
        assert!(matches!(
            resolve_zone("badexample.com", &zones),
            Err(Error::ZoneNotFound(_))
        ));
    }

    #[test]
    fn first_zone_in_provider_order_wins() {
        let broad_first = zones(&["example.com", "sub.example.com"]);
        let m = resolve_zone("x.sub.example.com", &broad_first).unwrap();
        assert_eq!(m.zone.name, "example.com");
        assert_eq!(m.record_name, "x.sub");

        let narrow_first = zones(&["sub.example.com", "example.com"]);
        let m = resolve_zone("x.sub.example.com", &narrow_first).unwrap();
        assert_eq!(m.zone.name, "sub.example.com");
        assert_eq!(m.record_name, "x");
    }

    #[test]
    fn unknown_hostname_is_zone_not_found() {
        let err = resolve_zone("test.notfound.com", &zones(&["example.com"])).unwrap_err();
        assert_eq!(err.to_string(), "no zone found for hostname: test.notfound.com");
        assert!(resolve_zone("example.com", &[]).is_err());
    }

    #[test]
    fn record_lookup_matches_name_and_type() {
        let records = vec![
            record("r1", "AAAA", "test"),
            record("r2", "A", "www"),
            record("r3", "A", "test"),
            record("r4", "A", "test"),
        ];

        assert_eq!(find_record(&records, "test", RecordType::A).unwrap().id, "r3");
        assert_eq!(find_record(&records, "test", RecordType::Aaaa).unwrap().id, "r1");
        assert!(find_record(&records, "www", RecordType::Aaaa).is_none());
        assert!(find_record(&records, "@", RecordType::A).is_none());
    }

    #[test]
    fn ipv4_validation() {
        for ip in ["192.168.1.1", "10.0.0.1", "255.255.255.255", "0.0.0.0"] {
            assert!(is_valid_ipv4(ip), "{} should be valid", ip);
        }
        for ip in [
            "256.1.1.1",
            "192.168.1",
            "192.168.1.1.1",
            "2001:db8::1",
            "::ffff:192.0.2.1",
            "invalid",
            "",
        ] {
            assert!(!is_valid_ipv4(ip), "{} should be invalid", ip);
        }
    }

    #[test]
    fn ipv6_validation() {
        for ip in [
            "2001:db8::1",
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
            "::1",
            "::ffff:192.0.2.1",
        ] {
            assert!(is_valid_ipv6(ip), "{} should be valid", ip);
        }
        for ip in ["192.168.1.1", "invalid", "2001:db8::g", "invalid::ip::address", ""] {
            assert!(!is_valid_ipv6(ip), "{} should be invalid", ip);
        }
    }
}
