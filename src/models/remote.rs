use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::models::secret::serialize_secret;

/// Every remote known to the controller, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteList {
    #[serde(default)]
    pub s3_remotes: Vec<S3Remote>,
    #[serde(default)]
    pub linstor_remotes: Vec<LinstorRemote>,
    /// EBS remotes are passed through undecoded.
    #[serde(default)]
    pub ebs_remotes: Vec<serde_json::Value>,
}

impl RemoteList {
    /// Names of all remotes regardless of kind.
    pub fn names(&self) -> Vec<&str> {
        self.s3_remotes
            .iter()
            .map(|r| r.remote_name.as_str())
            .chain(self.linstor_remotes.iter().map(|r| r.remote_name.as_str()))
            .chain(
                self.ebs_remotes
                    .iter()
                    .filter_map(|r| r.get("remote_name").and_then(|n| n.as_str())),
            )
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct S3Remote {
    pub remote_name: String,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    #[serde(default)]
    pub use_path_style: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinstorRemote {
    pub remote_name: String,
    pub url: String,
    #[serde(default)]
    pub cluster_id: Option<String>,
}

/// Request body for registering an S3 remote.
#[derive(Debug, Clone, Serialize)]
pub struct S3RemoteCreate {
    pub remote_name: String,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    #[serde(serialize_with = "serialize_secret")]
    pub access_key: SecretString,
    #[serde(serialize_with = "serialize_secret")]
    pub secret_key: SecretString,
    pub use_path_style: bool,
}

/// Request body for registering another LINSTOR cluster as a remote.
#[derive(Debug, Clone, Serialize)]
pub struct LinstorRemoteCreate {
    pub remote_name: String,
    pub url: String,
    #[serde(
        serialize_with = "crate::models::secret::serialize_optional_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub passphrase: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
}

/// Backups stored on a remote.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackupList {
    /// Backups created by LINSTOR, keyed by backup id.
    #[serde(default)]
    pub linstor: BTreeMap<String, Backup>,
    /// Objects in the bucket that LINSTOR does not recognise.
    #[serde(default)]
    pub other: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Backup {
    pub id: String,
    pub origin_rsc: String,
    #[serde(default)]
    pub origin_snap: Option<String>,
    #[serde(default)]
    pub origin_node: Option<String>,
    #[serde(default)]
    pub start_timestamp: Option<i64>,
    #[serde(default)]
    pub finished_timestamp: Option<i64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub shipping: Option<bool>,
    #[serde(default)]
    pub restorable: Option<bool>,
    #[serde(default)]
    pub fail_messages: Option<String>,
}

/// Request body for shipping a backup to a remote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupCreate {
    pub rsc_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    pub incremental: bool,
}

impl BackupCreate {
    pub fn full(rsc_name: impl Into<String>) -> Self {
        Self {
            rsc_name: rsc_name.into(),
            snap_name: None,
            node_name: None,
            incremental: false,
        }
    }

    pub fn incremental(rsc_name: impl Into<String>) -> Self {
        Self {
            incremental: true,
            ..Self::full(rsc_name)
        }
    }
}

/// Which objects a backup schedule applies to on a remote.
///
/// With neither a resource definition nor a group the schedule applies
/// controller-wide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackupScheduleTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsc_dfn_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grp_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_stor_pool: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub storpool_rename: BTreeMap<String, String>,
}

impl BackupScheduleTarget {
    pub fn resource_definition(name: impl Into<String>) -> Self {
        Self {
            rsc_dfn_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn resource_group(name: impl Into<String>) -> Self {
        Self {
            grp_name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn secrets_are_sent_but_not_printed() {
        let create = S3RemoteCreate {
            remote_name: "offsite".into(),
            endpoint: "s3.example.com".into(),
            bucket: "backups".into(),
            region: "eu-1".into(),
            access_key: SecretString::from("AKIA123".to_string()),
            secret_key: SecretString::from("very-secret".to_string()),
            use_path_style: true,
        };
        let body = serde_json::to_value(&create).unwrap();
        assert_eq!(body["access_key"], json!("AKIA123"));
        assert_eq!(body["secret_key"], json!("very-secret"));
        assert!(!format!("{create:?}").contains("very-secret"));
    }

    #[test]
    fn remote_names_span_all_kinds() {
        let remotes: RemoteList = serde_json::from_value(json!({
            "s3_remotes": [{ "remote_name": "s3a", "endpoint": "e", "bucket": "b", "region": "r" }],
            "linstor_remotes": [{ "remote_name": "dr-site", "url": "http://dr:3370" }],
            "ebs_remotes": [{ "remote_name": "ebs1" }]
        }))
        .unwrap();
        assert_eq!(remotes.names(), vec!["s3a", "dr-site", "ebs1"]);
    }
}
