use super::RcReply;
use crate::models::resource_group::{ResourceGroup, ResourceGroupModify, ResourceGroupSpawn};
use crate::{endpoints, LinstorClient, LinstorError, LinstorResult, RequestParams};

/// Provides methods for managing resource groups.
#[derive(Debug, Clone)]
pub struct ResourceGroupHandler {
    client: LinstorClient,
}

fn group_params(resource_group: &str) -> RequestParams {
    RequestParams::new().path("resource_group", resource_group)
}

impl ResourceGroupHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> LinstorResult<Vec<ResourceGroup>> {
        self.client
            .get(endpoints::RESOURCE_GROUPS, RequestParams::new())
            .await?
            .require(|| "Failed to list resource groups".to_string())
    }

    pub async fn get(&self, resource_group: &str) -> LinstorResult<ResourceGroup> {
        let groups: Vec<ResourceGroup> = self
            .client
            .get(endpoints::RESOURCE_GROUP, group_params(resource_group))
            .await?
            .require(|| format!("Failed to get resource group {resource_group}"))?;

        groups
            .into_iter()
            .find(|group| group.name == resource_group)
            .ok_or_else(|| LinstorError::NotFound(format!("resource group {resource_group}")))
    }

    pub async fn create(&self, group: &ResourceGroup) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::RESOURCE_GROUPS, RequestParams::new().body(group)?)
            .await
    }

    pub async fn modify(
        &self,
        resource_group: &str,
        modify: &ResourceGroupModify,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::RESOURCE_GROUP, group_params(resource_group).body(modify)?)
            .await
    }

    pub async fn delete(&self, resource_group: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::RESOURCE_GROUP, group_params(resource_group))
            .await
    }

    /// Creates a resource definition from the group's template and places it
    /// according to the group's select filter, in one controller call.
    pub async fn spawn(
        &self,
        resource_group: &str,
        spawn: &ResourceGroupSpawn,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::RESOURCE_GROUP_SPAWN, group_params(resource_group).body(spawn)?)
            .await
    }
}
