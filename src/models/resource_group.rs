use serde::{Deserialize, Serialize};

use crate::models::props::{Props, PropsModify};
use crate::models::resource::AutoSelectFilter;

/// A resource group: a template for resource definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub select_filter: AutoSelectFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl ResourceGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            props: Props::new(),
            select_filter: AutoSelectFilter::default(),
            uuid: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn select_filter(mut self, select_filter: AutoSelectFilter) -> Self {
        self.select_filter = select_filter;
        self
    }
}

/// Changes to a resource group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceGroupModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_filter: Option<AutoSelectFilter>,
    #[serde(flatten)]
    pub props: PropsModify,
}

/// Request body for spawning a resource definition from a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGroupSpawn {
    pub resource_definition_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_definition_external_name: Option<String>,
    /// One size per volume, in KiB.
    pub volume_sizes: Vec<u64>,
    /// Allow spawning with fewer volume sizes than the group defines.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
    /// Create only the definitions, do not place resources.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub definitions_only: bool,
}

impl ResourceGroupSpawn {
    pub fn new(resource_definition_name: impl Into<String>, volume_sizes: Vec<u64>) -> Self {
        Self {
            resource_definition_name: resource_definition_name.into(),
            resource_definition_external_name: None,
            volume_sizes,
            partial: false,
            definitions_only: false,
        }
    }

    pub fn definitions_only(mut self) -> Self {
        self.definitions_only = true;
        self
    }
}
