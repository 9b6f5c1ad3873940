use serde::{Deserialize, Serialize};

use crate::models::props::Props;

/// A snapshot of a resource definition, possibly spanning several nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub resource_name: String,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub volume_definitions: Vec<SnapshotVolumeDefinition>,
    /// Per node details.
    #[serde(default)]
    pub snapshots: Vec<SnapshotNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl Snapshot {
    /// Earliest creation time over all nodes, in milliseconds since the
    /// epoch.
    pub fn created_at_millis(&self) -> Option<i64> {
        self.snapshots.iter().filter_map(|s| s.create_timestamp).min()
    }

    pub fn is_successful(&self) -> bool {
        self.flags.iter().any(|flag| flag == "SUCCESSFUL")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotVolumeDefinition {
    pub volume_number: u32,
    #[serde(default)]
    pub size_kib: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    #[serde(default)]
    pub snapshot_name: String,
    pub node_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<i64>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// Request body for taking a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotCreate {
    pub name: String,
    /// Nodes to snapshot on. Empty means every node with the resource.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
}

impl SnapshotCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn on_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes = nodes.into_iter().map(Into::into).collect();
        self
    }
}

/// Request body for restoring a snapshot into a new resource definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRestore {
    pub to_resource: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
}
