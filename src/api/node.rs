use super::RcReply;
use crate::models::node::{NetInterface, Node, NodeModify};
use crate::{endpoints, LinstorClient, LinstorError, LinstorResult, RequestParams};

/// Provides methods for managing cluster nodes and their network interfaces.
#[derive(Debug, Clone)]
pub struct NodeHandler {
    client: LinstorClient,
}

fn node_params(node: &str) -> RequestParams {
    RequestParams::new().path("node", node)
}

impl NodeHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Lists nodes.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// let nodes = client.nodes().list().nodes(["alpha", "beta"]).limit(10).send().await?;
    /// for node in nodes {
    ///     println!("{node}: online = {}", node.is_online());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self) -> ListNodesBuilder {
        ListNodesBuilder::new(self.client.clone())
    }

    /// Fetches a single node by name.
    ///
    /// Returns [`LinstorError::NotFound`] if the controller does not know it.
    pub async fn get(&self, node: &str) -> LinstorResult<Node> {
        self.list()
            .nodes([node])
            .send()
            .await?
            .into_iter()
            .find(|n| n.name == node)
            .ok_or_else(|| LinstorError::NotFound(format!("node {node}")))
    }

    /// Registers a new node with the controller.
    pub async fn create(&self, node: &Node) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::NODES, RequestParams::new().body(node)?)
            .await
    }

    pub async fn modify(&self, node: &str, modify: impl Into<NodeModify>) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::NODE, node_params(node).body(&modify.into())?)
            .await
    }

    pub async fn delete(&self, node: &str) -> LinstorResult<RcReply> {
        self.client.del(endpoints::NODE, node_params(node)).await
    }

    /// Removes a node that will never come back, together with its resources.
    pub async fn lost(&self, node: &str) -> LinstorResult<RcReply> {
        self.client.del(endpoints::NODE_LOST, node_params(node)).await
    }

    pub async fn reconnect(&self, node: &str) -> LinstorResult<RcReply> {
        self.client.put(endpoints::NODE_RECONNECT, node_params(node)).await
    }

    /// Moves every resource off `node` so it can be removed.
    pub async fn evacuate(&self, node: &str) -> LinstorResult<RcReply> {
        self.client.put(endpoints::NODE_EVACUATE, node_params(node)).await
    }

    pub async fn net_interfaces(&self, node: &str) -> LinstorResult<Vec<NetInterface>> {
        self.client
            .get(endpoints::NODE_NET_INTERFACES, node_params(node))
            .await?
            .require(|| format!("Failed to list network interfaces of node {node}"))
    }

    pub async fn create_net_interface(
        &self,
        node: &str,
        net_interface: &NetInterface,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::NODE_NET_INTERFACES, node_params(node).body(net_interface)?)
            .await
    }

    /// Replaces the settings of the interface named `net_interface.name`.
    pub async fn modify_net_interface(
        &self,
        node: &str,
        net_interface: &NetInterface,
    ) -> LinstorResult<RcReply> {
        let params = node_params(node)
            .path("netif", net_interface.name.as_str())
            .body(net_interface)?;
        self.client.put(endpoints::NODE_NET_INTERFACE, params).await
    }

    pub async fn delete_net_interface(&self, node: &str, netif: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::NODE_NET_INTERFACE, node_params(node).path("netif", netif))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ListNodesBuilder {
    client: LinstorClient,
    nodes: Vec<String>,
    props: Vec<String>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl ListNodesBuilder {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self {
            client,
            nodes: Vec::new(),
            props: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    /// Only return these nodes.
    pub fn nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Only return nodes that carry these properties.
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

    pub async fn send(self) -> LinstorResult<Vec<Node>> {
        let params = RequestParams::new()
            .query_all("nodes", self.nodes)
            .query_all("props", self.props)
            .query_opt("offset", self.offset)
            .query_opt("limit", self.limit);

        self.client
            .get(endpoints::NODES, params)
            .await?
            .require(|| "Failed to list nodes".to_string())
    }
}
