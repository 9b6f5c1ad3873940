use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cron::CronExpr;
use crate::LinstorResult;

/// What the controller does when a scheduled backup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OnFailure {
    Skip,
    Retry,
}

impl fmt::Display for OnFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnFailure::Skip => write!(f, "SKIP"),
            OnFailure::Retry => write!(f, "RETRY"),
        }
    }
}

/// A backup schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique schedule name.
    pub schedule_name: String,

    /// Cron expression for full backups.
    pub full_cron: String,

    /// Cron expression for incremental backups, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inc_cron: Option<String>,

    /// Number of local snapshots to keep. `None` keeps all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_local: Option<u32>,

    /// Number of full backups to keep on the remote. `None` keeps all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_remote: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<OnFailure>,

    /// Retries before giving up, when `on_failure` is `RETRY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl Schedule {
    pub fn builder(
        schedule_name: impl Into<String>,
        full_cron: impl Into<String>,
    ) -> ScheduleBuilder {
        ScheduleBuilder::new(schedule_name, full_cron)
    }

    /// Parsed form of `full_cron`.
    pub fn full_cron_expr(&self) -> LinstorResult<CronExpr> {
        CronExpr::parse(&self.full_cron)
    }

    /// Parsed form of `inc_cron`, if one is set.
    pub fn inc_cron_expr(&self) -> LinstorResult<Option<CronExpr>> {
        self.inc_cron.as_deref().map(CronExpr::parse).transpose()
    }
}

/// Builder that validates cron expressions before a schedule is sent.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    schedule: Schedule,
}

impl ScheduleBuilder {
    pub fn new(schedule_name: impl Into<String>, full_cron: impl Into<String>) -> Self {
        Self {
            schedule: Schedule {
                schedule_name: schedule_name.into(),
                full_cron: full_cron.into(),
                inc_cron: None,
                keep_local: None,
                keep_remote: None,
                on_failure: None,
                max_retries: None,
            },
        }
    }

    pub fn inc_cron(mut self, inc_cron: impl Into<String>) -> Self {
        self.schedule.inc_cron = Some(inc_cron.into());
        self
    }

    pub fn keep_local(mut self, keep: u32) -> Self {
        self.schedule.keep_local = Some(keep);
        self
    }

    pub fn keep_remote(mut self, keep: u32) -> Self {
        self.schedule.keep_remote = Some(keep);
        self
    }

    pub fn on_failure(mut self, on_failure: OnFailure) -> Self {
        self.schedule.on_failure = Some(on_failure);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.schedule.max_retries = Some(retries);
        self
    }

    /// Validates both cron expressions and returns the schedule.
    pub fn build(self) -> LinstorResult<Schedule> {
        self.schedule.full_cron_expr()?;
        self.schedule.inc_cron_expr()?;
        Ok(self.schedule)
    }
}

/// Changes to a schedule. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inc_cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_local: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_remote: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<OnFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl ScheduleModify {
    /// Rejects cron expressions that do not parse.
    pub fn validate(&self) -> LinstorResult<()> {
        if let Some(full) = &self.full_cron {
            CronExpr::parse(full)?;
        }
        if let Some(inc) = &self.inc_cron {
            CronExpr::parse(inc)?;
        }
        Ok(())
    }
}

/// One row of the schedules-by-resource view: which schedule ships which
/// resource to which remote, and when it runs next.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleByResource {
    pub rsc_name: String,
    #[serde(default)]
    pub remote_name: Option<String>,
    #[serde(default)]
    pub schedule_name: Option<String>,
    /// Why the schedule applies, e.g. set on the resource definition or
    /// inherited from the group.
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub last_snap_time: Option<i64>,
    #[serde(default)]
    pub last_snap_inc: Option<bool>,
    #[serde(default)]
    pub next_exec_time: Option<i64>,
    #[serde(default)]
    pub next_exec_inc: Option<bool>,
    #[serde(default)]
    pub next_planned_full: Option<i64>,
    #[serde(default)]
    pub next_planned_inc: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinstorError;
    use serde_json::json;

    #[test]
    fn builder_validates_cron() {
        let schedule = Schedule::builder("nightly", "0 2 * * *")
            .inc_cron("0 */4 * * *")
            .keep_local(3)
            .on_failure(OnFailure::Retry)
            .max_retries(2)
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&schedule).unwrap(),
            json!({
                "schedule_name": "nightly",
                "full_cron": "0 2 * * *",
                "inc_cron": "0 */4 * * *",
                "keep_local": 3,
                "on_failure": "RETRY",
                "max_retries": 2
            })
        );

        let err = Schedule::builder("broken", "61 * * * *").build().unwrap_err();
        assert!(matches!(err, LinstorError::InvalidCron { .. }));

        let err = Schedule::builder("broken-inc", "0 2 * * *")
            .inc_cron("* * *")
            .build()
            .unwrap_err();
        assert!(matches!(err, LinstorError::InvalidCron { .. }));
    }

    #[test]
    fn modify_validation() {
        assert!(ScheduleModify::default().validate().is_ok());
        let modify = ScheduleModify {
            inc_cron: Some("*/15 * * * MON-FRI".into()),
            ..ScheduleModify::default()
        };
        assert!(modify.validate().is_ok());
        let modify = ScheduleModify {
            full_cron: Some("0 0 32 * *".into()),
            ..ScheduleModify::default()
        };
        assert!(modify.validate().is_err());
    }
}
