use super::RcReply;
use crate::models::props::PropsModify;
use crate::models::storage_pool::{StoragePool, StoragePoolCreate};
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Provides methods for managing storage pools.
#[derive(Debug, Clone)]
pub struct StoragePoolHandler {
    client: LinstorClient,
}

fn pool_params(node: &str, storage_pool: &str) -> RequestParams {
    RequestParams::new()
        .path("node", node)
        .path("storagepool", storage_pool)
}

impl StoragePoolHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Lists storage pools across the cluster.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// let pools = client.storage_pools().list().storage_pools(["thin"]).send().await?;
    /// for pool in pools {
    ///     println!("{}@{}: {:?} KiB free", pool.storage_pool_name, pool.node_name, pool.free_capacity);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self) -> ListStoragePoolsBuilder {
        ListStoragePoolsBuilder::new(self.client.clone())
    }

    /// Lists the storage pools of one node.
    pub async fn on_node(&self, node: &str) -> LinstorResult<Vec<StoragePool>> {
        self.client
            .get(endpoints::NODE_STORAGE_POOLS, RequestParams::new().path("node", node))
            .await?
            .require(|| format!("Failed to list storage pools of node {node}"))
    }

    pub async fn create(&self, node: &str, create: &StoragePoolCreate) -> LinstorResult<RcReply> {
        let params = RequestParams::new().path("node", node).body(create)?;
        self.client.post(endpoints::NODE_STORAGE_POOLS, params).await
    }

    pub async fn modify(
        &self,
        node: &str,
        storage_pool: &str,
        modify: &PropsModify,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::NODE_STORAGE_POOL, pool_params(node, storage_pool).body(modify)?)
            .await
    }

    pub async fn delete(&self, node: &str, storage_pool: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::NODE_STORAGE_POOL, pool_params(node, storage_pool))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ListStoragePoolsBuilder {
    client: LinstorClient,
    nodes: Vec<String>,
    storage_pools: Vec<String>,
    props: Vec<String>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl ListStoragePoolsBuilder {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self {
            client,
            nodes: Vec::new(),
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

    pub async fn send(self) -> LinstorResult<Vec<StoragePool>> {
        let params = RequestParams::new()
            .query_all("nodes", self.nodes)
            .query_all("storage_pools", self.storage_pools)
            .query_all("props", self.props)
            .query_opt("offset", self.offset)
            .query_opt("limit", self.limit);

        self.client
            .get(endpoints::VIEW_STORAGE_POOLS, params)
            .await?
            .require(|| "Failed to list storage pools".to_string())
    }
}
