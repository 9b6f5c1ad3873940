use crate::models::controller::ObjectCount;
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Object counts for the dashboard.
#[derive(Debug, Clone)]
pub struct StatsHandler {
    client: LinstorClient,
}

impl StatsHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    async fn count(&self, template: &str, what: &str) -> LinstorResult<u64> {
        let count: ObjectCount = self
            .client
            .get(template, RequestParams::new())
            .await?
            .require(|| format!("Failed to count {what}"))?;
        Ok(count.count)
    }

    pub async fn nodes(&self) -> LinstorResult<u64> {
        self.count(endpoints::STATS_NODES, "nodes").await
    }

    pub async fn resources(&self) -> LinstorResult<u64> {
        self.count(endpoints::STATS_RESOURCES, "resources").await
    }

    pub async fn resource_definitions(&self) -> LinstorResult<u64> {
        self.count(endpoints::STATS_RESOURCE_DEFINITIONS, "resource definitions")
            .await
    }

    pub async fn storage_pools(&self) -> LinstorResult<u64> {
        self.count(endpoints::STATS_STORAGE_POOLS, "storage pools").await
    }
}
