//! Core traits for the bridge
//!
//! - [`DnsProvider`]: Typed access to a remote zone-management API

pub mod dns_provider;

pub use dns_provider::DnsProvider;
