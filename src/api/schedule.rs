use super::RcReply;
use crate::models::api_response::ListBody;
use crate::models::schedule::{Schedule, ScheduleByResource, ScheduleModify};
use crate::{endpoints, LinstorClient, LinstorError, LinstorResult, RequestParams};

/// Provides methods for managing backup schedules.
///
/// Cron expressions are validated locally before anything is sent.
#[derive(Debug, Clone)]
pub struct ScheduleHandler {
    client: LinstorClient,
}

fn schedule_params(schedule: &str) -> RequestParams {
    RequestParams::new().path("scheduleName", schedule)
}

impl ScheduleHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> LinstorResult<Vec<Schedule>> {
        let body: ListBody<Schedule> = self
            .client
            .get(endpoints::SCHEDULES, RequestParams::new())
            .await?
            .require(|| "Failed to list schedules".to_string())?;
        Ok(body.into_vec())
    }

    pub async fn get(&self, schedule: &str) -> LinstorResult<Schedule> {
        let body: ListBody<Schedule> = self
            .client
            .get(endpoints::SCHEDULE, schedule_params(schedule))
            .await?
            .require(|| format!("Failed to get schedule {schedule}"))?;

        body.into_vec()
            .into_iter()
            .find(|s| s.schedule_name == schedule)
            .ok_or_else(|| LinstorError::NotFound(format!("schedule {schedule}")))
    }

    /// Creates a schedule.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use linstor_client::{OnFailure, Schedule};
    ///
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// let schedule = Schedule::builder("nightly", "0 2 * * *")
    ///     .inc_cron("0 */4 * * *")
    ///     .keep_remote(7)
    ///     .on_failure(OnFailure::Retry)
    ///     .max_retries(3)
    ///     .build()?;
    /// client.schedules().create(&schedule).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, schedule: &Schedule) -> LinstorResult<RcReply> {
        schedule.full_cron_expr()?;
        schedule.inc_cron_expr()?;
        self.client
            .post(endpoints::SCHEDULES, RequestParams::new().body(schedule)?)
            .await
    }

    pub async fn modify(&self, schedule: &str, modify: &ScheduleModify) -> LinstorResult<RcReply> {
        modify.validate()?;
        self.client
            .put(endpoints::SCHEDULE, schedule_params(schedule).body(modify)?)
            .await
    }

    pub async fn delete(&self, schedule: &str) -> LinstorResult<RcReply> {
        self.client.del(endpoints::SCHEDULE, schedule_params(schedule)).await
    }

    /// Shows which schedules apply to which resources.
    pub fn by_resource(&self) -> SchedulesByResourceBuilder {
        SchedulesByResourceBuilder::new(self.client.clone())
    }
}

#[derive(Debug, Clone)]
pub struct SchedulesByResourceBuilder {
    client: LinstorClient,
    resource: Option<String>,
    remote: Option<String>,
    schedule: Option<String>,
    active_only: bool,
}

impl SchedulesByResourceBuilder {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self {
            client,
            resource: None,
            remote: None,
            schedule: None,
            active_only: false,
        }
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = Some(remote.into());
        self
    }

    pub fn schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    /// Hide rows whose schedule is not currently enabled.
    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub async fn send(self) -> LinstorResult<Vec<ScheduleByResource>> {
        let params = RequestParams::new()
            .query_opt("rsc", self.resource)
            .query_opt("remote", self.remote)
            .query_opt("snap", self.schedule)
            .query_opt("active-only", self.active_only.then_some(true));

        let body: ListBody<ScheduleByResource> = self
            .client
            .get(endpoints::VIEW_SCHEDULES_BY_RESOURCE, params)
            .await?
            .require(|| "Failed to list schedules by resource".to_string())?;
        Ok(body.into_vec())
    }
}
