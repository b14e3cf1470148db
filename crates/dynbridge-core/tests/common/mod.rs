//! Test doubles and common utilities for bridge contract tests
//!
//! `MockDnsProvider` is an in-memory zone API that records every call, so
//! tests can assert which provider operations a request triggered.

#![allow(dead_code)]

use dynbridge_core::config::{BridgeConfig, Credentials, ProviderConfig};
use dynbridge_core::error::{Error, Result};
use dynbridge_core::types::{CreateRecordRequest, DnsRecord, UpdateRecordRequest, Zone};
use dynbridge_core::{DnsProvider, UpdateBridge};
use std::sync::{Arc, Mutex};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "password";

/// A provider call as observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListZones,
    ListRecords(String),
    GetRecord(String),
    Create(CreateRecordRequest),
    Update(String, UpdateRecordRequest),
    Delete(String),
}

/// Provider operation that can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    ListZones,
    ListRecords,
    Create,
    Update,
}

#[derive(Default)]
struct Inner {
    zones: Vec<Zone>,
    records: Vec<DnsRecord>,
    calls: Vec<Call>,
    failing: Vec<Op>,
    next_id: usize,
}

/// In-memory DnsProvider that tracks calls
///
/// Clones share state, so a test can keep one handle and give another to
/// the bridge.
#[derive(Clone, Default)]
pub struct MockDnsProvider {
    inner: Arc<Mutex<Inner>>,
}

impl MockDnsProvider {
    pub fn new(zones: Vec<Zone>, records: Vec<DnsRecord>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                zones,
                records,
                ..Inner::default()
            })),
        }
    }

    /// Make every call of `op` fail with a provider API error
    pub fn failing(self, op: Op) -> Self {
        self.inner.lock().unwrap().failing.push(op);
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Current record set
    pub fn records(&self) -> Vec<DnsRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    fn enter(&self, call: Call, op: Option<Op>) -> Result<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if let Some(op) = op {
            if inner.failing.contains(&op) {
                return Err(Error::api(500, Some(500), format!("{:?} failed", op)));
            }
        }
        Ok(inner)
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let inner = self.enter(Call::ListZones, Some(Op::ListZones))?;
        Ok(inner.zones.clone())
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let inner = self.enter(Call::ListRecords(zone_id.to_string()), Some(Op::ListRecords))?;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect())
    }

    async fn get_record(&self, record_id: &str) -> Result<DnsRecord> {
        let inner = self.enter(Call::GetRecord(record_id.to_string()), None)?;
        inner
            .records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| Error::api(404, Some(404), "record not found"))
    }

    async fn create_record(&self, request: &CreateRecordRequest) -> Result<DnsRecord> {
        let mut inner = self.enter(Call::Create(request.clone()), Some(Op::Create))?;
        inner.next_id += 1;
        let record = DnsRecord {
            id: format!("created{}", inner.next_id),
            record_type: request.record_type.clone(),
            name: request.name.clone(),
            value: request.value.clone(),
            ttl: request.ttl,
            zone_id: request.zone_id.clone(),
            ..DnsRecord::default()
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        record_id: &str,
        request: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let mut inner = self.enter(
            Call::Update(record_id.to_string(), request.clone()),
            Some(Op::Update),
        )?;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::api(404, Some(404), "record not found"))?;
        record.value = request.value.clone();
        record.ttl = request.ttl;
        Ok(record.clone())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let mut inner = self.enter(Call::Delete(record_id.to_string()), None)?;
        inner.records.retain(|r| r.id != record_id);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Zone with only identity fields
pub fn zone(id: &str, name: &str) -> Zone {
    Zone::new(id, name)
}

/// Record in `zone_id`
pub fn record(
    id: &str,
    zone_id: &str,
    record_type: &str,
    name: &str,
    value: &str,
    ttl: Option<u32>,
) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        record_type: record_type.to_string(),
        name: name.to_string(),
        value: value.to_string(),
        ttl,
        zone_id: zone_id.to_string(),
        ..DnsRecord::default()
    }
}

/// Helper to create a minimal BridgeConfig for testing
pub fn minimal_config() -> BridgeConfig {
    BridgeConfig::new(
        Credentials::new(USERNAME, PASSWORD),
        ProviderConfig::hetzner("test-api-key"),
    )
}

/// Bridge over the given mock, with the test credentials
pub fn bridge(provider: &MockDnsProvider) -> UpdateBridge {
    UpdateBridge::from_config(Arc::new(provider.clone()), &minimal_config())
        .expect("bridge construction succeeds")
}

/// Credentials a router would present
pub fn valid_credentials() -> Credentials {
    Credentials::new(USERNAME, PASSWORD)
}
