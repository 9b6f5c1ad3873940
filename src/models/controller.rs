use serde::Deserialize;

/// Controller build information.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControllerVersion {
    pub version: String,
    #[serde(default)]
    pub git_hash: Option<String>,
    #[serde(default)]
    pub build_time: Option<String>,
    #[serde(default)]
    pub rest_api_version: Option<String>,
}

/// Body of the `/v1/stats/...` endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ObjectCount {
    pub count: u64,
}
