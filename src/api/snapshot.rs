use super::RcReply;
use crate::models::snapshot::{Snapshot, SnapshotCreate, SnapshotRestore};
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Provides methods for taking, restoring and deleting snapshots.
///
/// With the default exclusions, responses of the snapshot endpoints are not
/// passed to the client's notifier.
#[derive(Debug, Clone)]
pub struct SnapshotHandler {
    client: LinstorClient,
}

fn snapshot_params(resource: &str, snapshot: &str) -> RequestParams {
    RequestParams::new()
        .path("resource", resource)
        .path("snapshot", snapshot)
}

impl SnapshotHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Lists snapshots across the cluster.
    pub fn list(&self) -> ListSnapshotsBuilder {
        ListSnapshotsBuilder::new(self.client.clone())
    }

    pub async fn create(&self, resource: &str, create: &SnapshotCreate) -> LinstorResult<RcReply> {
        let params = RequestParams::new().path("resource", resource).body(create)?;
        self.client.post(endpoints::SNAPSHOTS, params).await
    }

    pub async fn delete(&self, resource: &str, snapshot: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::SNAPSHOT, snapshot_params(resource, snapshot))
            .await
    }

    /// Rolls `resource` back to `snapshot`. Every newer snapshot is lost.
    pub async fn rollback(&self, resource: &str, snapshot: &str) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::SNAPSHOT_ROLLBACK, snapshot_params(resource, snapshot))
            .await
    }

    /// Restores `snapshot` of `resource` into the definition named in
    /// `restore`, which must already exist without volumes.
    pub async fn restore(
        &self,
        resource: &str,
        snapshot: &str,
        restore: &SnapshotRestore,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(
                endpoints::SNAPSHOT_RESTORE,
                snapshot_params(resource, snapshot).body(restore)?,
            )
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ListSnapshotsBuilder {
    client: LinstorClient,
    nodes: Vec<String>,
    resources: Vec<String>,
    snapshots: Vec<String>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl ListSnapshotsBuilder {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self {
            client,
            nodes: Vec::new(),
            resources: Vec::new(),
            snapshots: Vec::new(),
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

    pub fn snapshots<I, S>(mut self, snapshots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.snapshots.extend(snapshots.into_iter().map(Into::into));
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

    pub async fn send(self) -> LinstorResult<Vec<Snapshot>> {
        let params = RequestParams::new()
            .query_all("nodes", self.nodes)
            .query_all("resources", self.resources)
            .query_all("snapshots", self.snapshots)
            .query_opt("offset", self.offset)
            .query_opt("limit", self.limit);

        self.client
            .get(endpoints::VIEW_SNAPSHOTS, params)
            .await?
            .require(|| "Failed to list snapshots".to_string())
    }
}
