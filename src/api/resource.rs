use super::RcReply;
use crate::models::props::PropsModify;
use crate::models::resource::{Resource, ResourceCreate};
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Provides methods for managing resources, the per-node replicas of a
/// resource definition.
#[derive(Debug, Clone)]
pub struct ResourceHandler {
    client: LinstorClient,
}

fn resource_params(resource: &str, node: &str) -> RequestParams {
    RequestParams::new()
        .path("resource", resource)
        .path("node", node)
}

impl ResourceHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Lists resources with their volumes across the cluster.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// let resources = client.resources().list().nodes(["alpha"]).send().await?;
    /// for resource in resources.iter().filter(|r| r.in_use()) {
    ///     println!("{} is in use on {}", resource.name, resource.node_name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self) -> ListResourcesBuilder {
        ListResourcesBuilder::new(self.client.clone())
    }

    /// Lists the resources of one resource definition.
    pub async fn of_definition(&self, resource: &str) -> LinstorResult<Vec<Resource>> {
        self.client
            .get(endpoints::RESOURCES, RequestParams::new().path("resource", resource))
            .await?
            .require(|| format!("Failed to list resources of {resource}"))
    }

    /// Deploys `resource` on `node`.
    pub async fn create(
        &self,
        resource: &str,
        node: &str,
        create: &ResourceCreate,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::RESOURCE, resource_params(resource, node).body(create)?)
            .await
    }

    pub async fn modify(
        &self,
        resource: &str,
        node: &str,
        modify: &PropsModify,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::RESOURCE, resource_params(resource, node).body(modify)?)
            .await
    }

    pub async fn delete(&self, resource: &str, node: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::RESOURCE, resource_params(resource, node))
            .await
    }

    /// Moves the disk of `resource` from `from_node` to `node`, optionally
    /// into a specific storage pool.
    pub async fn migrate_disk(
        &self,
        resource: &str,
        from_node: &str,
        node: &str,
        storage_pool: Option<&str>,
    ) -> LinstorResult<RcReply> {
        let params = resource_params(resource, node)
            .path("fromnode", from_node)
            .query_opt("storage_pool", storage_pool);
        self.client.put(endpoints::RESOURCE_MIGRATE_DISK, params).await
    }

    /// Gives a diskless resource a local disk.
    pub async fn toggle_diskful(&self, resource: &str, node: &str) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::RESOURCE_TOGGLE_DISKFUL, resource_params(resource, node))
            .await
    }

    pub async fn toggle_diskless(&self, resource: &str, node: &str) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::RESOURCE_TOGGLE_DISKLESS, resource_params(resource, node))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ListResourcesBuilder {
    client: LinstorClient,
    nodes: Vec<String>,
    resources: Vec<String>,
    storage_pools: Vec<String>,
    props: Vec<String>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl ListResourcesBuilder {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self {
            client,
            nodes: Vec::new(),
            resources: Vec::new(),
            storage_pools: Vec::new(),
            props: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    pub fn nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources.extend(resources.into_iter().map(Into::into));
        self
    }

    pub fn storage_pools<I, S>(mut self, storage_pools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.storage_pools
            .extend(storage_pools.into_iter().map(Into::into));
        self
    }

    pub fn props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props.extend(props.into_iter().map(Into::into));
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub async fn send(self) -> LinstorResult<Vec<Resource>> {
        let params = RequestParams::new()
            .query_all("nodes", self.nodes)
            .query_all("resources", self.resources)
            .query_all("storage_pools", self.storage_pools)
            .query_all("props", self.props)
            .query_opt("offset", self.offset)
            .query_opt("limit", self.limit);

        self.client
            .get(endpoints::VIEW_RESOURCES, params)
            .await?
            .require(|| "Failed to list resources".to_string())
    }
}
