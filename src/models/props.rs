use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property map attached to most controller objects.
pub type Props = BTreeMap<String, String>;

/// Property changes accepted by every `modify` endpoint.
///
/// `override_props` sets or replaces keys, `delete_props` removes keys and
/// `delete_namespaces` removes every key below a namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropsModify {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub override_props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delete_props: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delete_namespaces: Vec<String>,
}

impl PropsModify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.override_props.insert(key.into(), value.into());
        self
    }

    /// Removes `key`.
    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.delete_props.push(key.into());
        self
    }

    /// Removes every key in `namespace`.
    pub fn delete_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.delete_namespaces.push(namespace.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.override_props.is_empty()
            && self.delete_props.is_empty()
            && self.delete_namespaces.is_empty()
    }
}
