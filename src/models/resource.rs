use serde::{Deserialize, Serialize};

use crate::models::props::{Props, PropsModify};

/// A resource definition: the cluster-wide description of a replicated
/// volume set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_name: Option<String>,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_name: None,
            resource_group_name: None,
            props: Props::new(),
            flags: Vec::new(),
            uuid: None,
        }
    }

    pub fn in_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group_name = Some(resource_group.into());
        self
    }
}

/// Request body for creating a resource definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDefinitionCreate {
    pub resource_definition: ResourceDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drbd_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drbd_transport_type: Option<String>,
}

impl From<ResourceDefinition> for ResourceDefinitionCreate {
    fn from(resource_definition: ResourceDefinition) -> Self {
        Self {
            resource_definition,
            drbd_port: None,
            drbd_transport_type: None,
        }
    }
}

/// Changes to a resource definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceDefinitionModify {
    /// Moves the definition into another resource group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(flatten)]
    pub props: PropsModify,
}

/// A volume of a resource definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_number: Option<u32>,
    pub size_kib: u64,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

impl VolumeDefinition {
    pub fn with_size_kib(size_kib: u64) -> Self {
        Self {
            volume_number: None,
            size_kib,
            props: Props::new(),
            flags: Vec::new(),
        }
    }
}

/// Request body for creating a volume definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeDefinitionCreate {
    pub volume_definition: VolumeDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drbd_minor_number: Option<u32>,
}

impl From<VolumeDefinition> for VolumeDefinitionCreate {
    fn from(volume_definition: VolumeDefinition) -> Self {
        Self {
            volume_definition,
            drbd_minor_number: None,
        }
    }
}

/// Placement constraints used by auto-place and resource groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoSelectFilter {
    /// Number of diskful replicas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_place_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_pool: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_pool_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_pool_diskless_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_name_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_place_with_rsc: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replicas_on_same: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replicas_on_different: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layer_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diskless_on_remaining: Option<bool>,
}

impl AutoSelectFilter {
    pub fn place_count(count: u32) -> Self {
        Self {
            place_count: Some(count),
            ..Self::default()
        }
    }

    pub fn storage_pool(mut self, storage_pool: impl Into<String>) -> Self {
        self.storage_pool = Some(storage_pool.into());
        self
    }
}

/// Request body for auto-placing a resource definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutoPlaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diskless_on_remaining: Option<bool>,
    pub select_filter: AutoSelectFilter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layer_list: Vec<String>,
}

impl From<AutoSelectFilter> for AutoPlaceRequest {
    fn from(select_filter: AutoSelectFilter) -> Self {
        Self {
            select_filter,
            ..Self::default()
        }
    }
}

/// A resource: one replica of a resource definition on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub node_name: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ResourceState>,
    /// Only present in the `/v1/view/resources` view.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    /// Layer tree as reported by the controller; not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_object: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl Resource {
    pub fn is_diskless(&self) -> bool {
        self.flags.iter().any(|flag| flag == "DISKLESS" || flag == "DRBD_DISKLESS")
    }

    pub fn in_use(&self) -> bool {
        self.state.as_ref().and_then(|state| state.in_use).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_use: Option<bool>,
}

/// A volume of a resource on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default)]
    pub volume_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_pool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_size_kib: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable_size_kib: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<VolumeState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeState {
    /// DRBD disk state, e.g. `UpToDate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_state: Option<String>,
}

/// Request body for creating a resource on a given node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceCreate {
    pub resource: ResourceCreateSpec,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layer_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceCreateSpec {
    #[serde(skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

impl ResourceCreate {
    /// A diskful resource in `storage_pool`.
    pub fn in_storage_pool(storage_pool: impl Into<String>) -> Self {
        let mut create = Self::default();
        create
            .resource
            .props
            .insert("StorPoolName".to_string(), storage_pool.into());
        create
    }

    /// A diskless resource.
    pub fn diskless() -> Self {
        let mut create = Self::default();
        create.resource.flags.push("DRBD_DISKLESS".to_string());
        create
    }
}
