//! DNS records hosted on the reseller's nameservers.

use serde::{Deserialize, Serialize};

use super::params::Param;

/// A single DNS record, as sent to `save-ph-dns-records` and returned by
/// `get-ph-dns-records`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    pub hostname: String,
    pub address: String,
    /// Record type, e.g. `A`, `CNAME`, `MX`, `TXT`.
    #[serde(rename = "type")]
    pub record_type: String,
}

impl DnsRecord {
    pub fn new(
        hostname: impl Into<String>,
        address: impl Into<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            address: address.into(),
            record_type: record_type.into(),
        }
    }

    /// Parameters for this record at position `index` (1-based).
    pub fn to_indexed_params(&self, index: usize) -> [Param; 3] {
        [
            Param::new(format!("hostname{index}"), self.hostname.as_str()),
            Param::new(format!("address{index}"), self.address.as_str()),
            Param::new(format!("type{index}"), self.record_type.as_str()),
        ]
    }
}

/// Flatten a zone into `hostname{i}`, `address{i}`, `type{i}` triples,
/// numbered from 1 in slice order.
pub fn indexed_params(records: &[DnsRecord]) -> Vec<Param> {
    records
        .iter()
        .enumerate()
        .flat_map(|(i, record)| record.to_indexed_params(i + 1))
        .collect()
}
