//! Bare-metal capacity
//!
//! `/v1/bmcapacity/{project}/{region}`: free nodes per bare-metal flavor.

use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of free nodes keyed by flavor name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailableNodes(pub BTreeMap<String, u64>);

impl AvailableNodes {
    /// Free nodes for one flavor (0 when the flavor is unknown)
    pub fn count_for(&self, flavor: &str) -> u64 {
        self.0.get(flavor).copied().unwrap_or(0)
    }

    /// Flavors with at least one free node
    pub fn available_flavors(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(name, _)| name.as_str())
    }
}

/// Free bare-metal nodes in the configured project and region
pub async fn list(client: &ServiceClient) -> Result<AvailableNodes> {
    let url = client.regional_url("v1", "bmcapacity", &[])?;
    client.get_json(&url, RequestOpts::new()).await
}
