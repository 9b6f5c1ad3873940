use serde::{Deserialize, Serialize};

use crate::models::api_call_rc::ApiCallRc;
use crate::models::props::Props;

/// A storage pool on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoragePool {
    pub storage_pool_name: String,
    #[serde(default)]
    pub node_name: String,
    /// Backing provider, e.g. `LVM_THIN`, `ZFS`, `DISKLESS`.
    pub provider_kind: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub static_traits: Props,
    /// Free capacity in KiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_capacity: Option<u64>,
    /// Total capacity in KiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_space_mgr_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_snapshots: Option<bool>,
    /// Problems the satellite reported for this pool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<ApiCallRc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl StoragePool {
    /// Used capacity in KiB, when both figures are known.
    pub fn used_capacity(&self) -> Option<u64> {
        Some(self.total_capacity?.saturating_sub(self.free_capacity?))
    }
}

/// Request body for creating a storage pool on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoragePoolCreate {
    pub storage_pool_name: String,
    pub provider_kind: String,
    #[serde(skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_space_mgr_name: Option<String>,
}

impl StoragePoolCreate {
    pub fn new(name: impl Into<String>, provider_kind: impl Into<String>) -> Self {
        Self {
            storage_pool_name: name.into(),
            provider_kind: provider_kind.into(),
            props: Props::new(),
            free_space_mgr_name: None,
        }
    }

    /// Sets a provider property, e.g. `StorDriver/LvmVg`.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}
