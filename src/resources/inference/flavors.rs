//! Inference flavors

use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient};
use crate::pagination::Pager;
use serde::{Deserialize, Serialize};

/// Hardware flavor available for inference deployments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    pub name: String,
    pub cpu: f64,
    /// Memory in GiB
    pub memory: f64,
    pub gpu: u32,
    #[serde(default)]
    pub gpu_model: Option<String>,
    /// GPU memory in GiB
    #[serde(default)]
    pub gpu_memory: Option<f64>,
    #[serde(default)]
    pub gpu_compute_capability: Option<String>,
}

/// List every flavor
pub async fn list(client: &ServiceClient) -> Result<Vec<Flavor>> {
    let url = client.url(&["v3", "inference", "flavors"]);
    Pager::offset(client, &url)?.extract_all().await
}

/// Get a flavor by name
pub async fn get(client: &ServiceClient, name: &str) -> Result<Flavor> {
    let url = client.url(&["v3", "inference", "flavors", name]);
    client.get_json(&url, RequestOpts::new()).await
}
