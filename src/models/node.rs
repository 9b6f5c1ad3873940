use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::props::{Props, PropsModify};

/// A node of the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node name.
    pub name: String,

    /// Role of the node, e.g. `SATELLITE` or `COMBINED`.
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub flags: Vec<String>,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub net_interfaces: Vec<NetInterface>,

    /// Connection state as seen by the controller, e.g. `ONLINE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_status: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_providers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_layers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl Node {
    /// Creates a node description suitable for [`crate::NodeHandler::create`].
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            flags: Vec::new(),
            props: Props::new(),
            net_interfaces: Vec::new(),
            connection_status: None,
            storage_providers: Vec::new(),
            resource_layers: Vec::new(),
            uuid: None,
        }
    }

    pub fn with_net_interface(mut self, net_interface: NetInterface) -> Self {
        self.net_interfaces.push(net_interface);
        self
    }

    pub fn is_online(&self) -> bool {
        self.connection_status.as_deref() == Some("ONLINE")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.node_type)
    }
}

/// A network interface of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetInterface {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite_port: Option<u16>,
    /// `PLAIN` or `SSL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite_encryption_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl NetInterface {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            satellite_port: None,
            satellite_encryption_type: None,
            is_active: None,
            uuid: None,
        }
    }

    /// Marks this interface as the satellite connection on `port`.
    pub fn satellite(mut self, port: u16, encryption_type: impl Into<String>) -> Self {
        self.satellite_port = Some(port);
        self.satellite_encryption_type = Some(encryption_type.into());
        self
    }
}

/// Changes to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(flatten)]
    pub props: PropsModify,
}

impl From<PropsModify> for NodeModify {
    fn from(props: PropsModify) -> Self {
        Self {
            node_type: None,
            props,
        }
    }
}
