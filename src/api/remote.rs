use log::info;

use super::RcReply;
use crate::models::remote::{
    BackupCreate, BackupList, BackupScheduleTarget, LinstorRemoteCreate, RemoteList, S3RemoteCreate,
};
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Provides methods for managing backup remotes and the backups on them.
#[derive(Debug, Clone)]
pub struct RemoteHandler {
    client: LinstorClient,
}

fn remote_params(remote: &str) -> RequestParams {
    RequestParams::new().path("remote_name", remote)
}

fn schedule_params(
    remote: &str,
    schedule: &str,
    target: &BackupScheduleTarget,
) -> LinstorResult<RequestParams> {
    remote_params(remote)
        .path("schedule_name", schedule)
        .body(target)
}

impl RemoteHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> LinstorResult<RemoteList> {
        self.client
            .get(endpoints::REMOTES, RequestParams::new())
            .await?
            .require(|| "Failed to list remotes".to_string())
    }

    pub async fn create_s3(&self, remote: &S3RemoteCreate) -> LinstorResult<RcReply> {
        info!("Registering S3 remote {} ({})", remote.remote_name, remote.endpoint);
        self.client
            .post(endpoints::REMOTES_S3, RequestParams::new().body(remote)?)
            .await
    }

    pub async fn create_linstor(&self, remote: &LinstorRemoteCreate) -> LinstorResult<RcReply> {
        info!("Registering LINSTOR remote {} ({})", remote.remote_name, remote.url);
        self.client
            .post(endpoints::REMOTES_LINSTOR, RequestParams::new().body(remote)?)
            .await
    }

    pub async fn delete(&self, remote: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::REMOTES, RequestParams::new().query("remote_name", remote))
            .await
    }

    /// Lists the backups stored on `remote`.
    pub async fn backups(&self, remote: &str) -> LinstorResult<BackupList> {
        self.client
            .get(endpoints::REMOTE_BACKUPS, remote_params(remote))
            .await?
            .require(|| format!("Failed to list backups on remote {remote}"))
    }

    /// Ships a backup of a resource to `remote`.
    pub async fn create_backup(&self, remote: &str, backup: &BackupCreate) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::REMOTE_BACKUPS, remote_params(remote).body(backup)?)
            .await
    }

    /// Starts shipping backups of `target` to `remote` on `schedule`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use linstor_client::BackupScheduleTarget;
    ///
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// let reply = client
    ///     .remotes()
    ///     .enable_schedule("offsite", "nightly", &BackupScheduleTarget::resource_group("gold"))
    ///     .await?;
    /// println!("{:?}", reply.outcome());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn enable_schedule(
        &self,
        remote: &str,
        schedule: &str,
        target: &BackupScheduleTarget,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::BACKUP_SCHEDULE_ENABLE, schedule_params(remote, schedule, target)?)
            .await
    }

    pub async fn disable_schedule(
        &self,
        remote: &str,
        schedule: &str,
        target: &BackupScheduleTarget,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::BACKUP_SCHEDULE_DISABLE, schedule_params(remote, schedule, target)?)
            .await
    }

    /// Removes the schedule from `target` without deleting the schedule
    /// itself.
    pub async fn delete_schedule(
        &self,
        remote: &str,
        schedule: &str,
        target: &BackupScheduleTarget,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::BACKUP_SCHEDULE_DELETE, schedule_params(remote, schedule, target)?)
            .await
    }
}
