use crate::models::controller::ControllerVersion;
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

#[derive(Debug, Clone)]
pub struct ControllerHandler {
    client: LinstorClient,
}

impl ControllerHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Fetches the controller's version. Handy as a connectivity check.
    pub async fn version(&self) -> LinstorResult<ControllerVersion> {
        self.client
            .get(endpoints::CONTROLLER_VERSION, RequestParams::new())
            .await?
            .require(|| "Failed to get controller version".to_string())
    }
}
