//! Central inspection of controller responses.
//!
//! Every response the client receives is offered to a [`ResponseInterceptor`]
//! exactly once. If the response is worth reporting, its JSON body is handed
//! to a [`Notifier`], which is where an application hooks in its toasts,
//! logs or audit trail. The caller of the request still receives the full,
//! unmodified body.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::models::api_call_rc::ApiCallRc;

/// Receives the JSON body of every inspected response.
pub trait Notifier: Send + Sync {
    fn notify(&self, body: &Value);
}

impl<F> Notifier for F
where
    F: Fn(&Value) + Send + Sync,
{
    fn notify(&self, body: &Value) {
        self(body)
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _body: &Value) {}
}

/// Logs the return codes found in a body through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, body: &Value) {
        for notification in Notification::from_body(body) {
            match notification.level {
                NotificationLevel::Error => warn!(target: "linstor_client::notify", "{notification}"),
                _ => info!(target: "linstor_client::notify", "{notification}"),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A user-facing message derived from one return code.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub details: Option<String>,
}

impl Notification {
    /// Extracts notifications from a response body.
    ///
    /// Accepts either a list of return codes or a single return code object.
    /// Anything else yields no notifications.
    pub fn from_body(body: &Value) -> Vec<Notification> {
        let rcs: Vec<ApiCallRc> = match body {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            Value::Object(map) if map.contains_key("ret_code") => {
                serde_json::from_value(body.clone()).map(|rc| vec![rc]).unwrap_or_default()
            }
            _ => Vec::new(),
        };

        rcs.into_iter().map(Notification::from).collect()
    }
}

impl From<ApiCallRc> for Notification {
    fn from(rc: ApiCallRc) -> Self {
        let level = if rc.is_error() {
            NotificationLevel::Error
        } else if rc.is_success() {
            NotificationLevel::Success
        } else {
            NotificationLevel::Info
        };
        let details = match (rc.details, rc.cause) {
            (Some(details), _) => Some(details),
            (None, cause) => cause,
        };
        Notification {
            level,
            message: rc.message,
            details,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => f.write_str(&self.message),
        }
    }
}

/// URL substrings whose responses are never reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionList {
    pub substrings: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            substrings: substrings.into_iter().map(Into::into).collect(),
        }
    }

    /// An exclusion list that excludes nothing.
    pub fn empty() -> Self {
        Self {
            substrings: Vec::new(),
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        self.substrings.iter().any(|s| url.contains(s.as_str()))
    }
}

impl Default for ExclusionList {
    /// Key-value store and snapshot responses are not return-code lists.
    fn default() -> Self {
        Self::new(["key-value-store", "snapshots"])
    }
}

/// Decides which responses are reported and forwards their bodies.
#[derive(Clone)]
pub struct ResponseInterceptor {
    notifier: Arc<dyn Notifier>,
    exclusions: ExclusionList,
}

impl fmt::Debug for ResponseInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseInterceptor")
            .field("exclusions", &self.exclusions)
            .finish_non_exhaustive()
    }
}

impl Default for ResponseInterceptor {
    fn default() -> Self {
        Self::new(Arc::new(LogNotifier), ExclusionList::default())
    }
}

impl ResponseInterceptor {
    pub fn new(notifier: Arc<dyn Notifier>, exclusions: ExclusionList) -> Self {
        Self {
            notifier,
            exclusions,
        }
    }

    /// An interceptor that never reports anything.
    pub fn silent() -> Self {
        Self::new(Arc::new(NoopNotifier), ExclusionList::default())
    }

    pub fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    /// Returns true if a response with this status is inspected at all.
    pub fn inspects_status(status: StatusCode) -> bool {
        status.is_success()
            || status == StatusCode::BAD_REQUEST
            || status == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Inspects one response. Returns true if the notifier was called.
    ///
    /// Bodies that are not JSON are skipped without error.
    pub fn inspect(&self, url: &Url, status: StatusCode, body: &[u8]) -> bool {
        if !Self::inspects_status(status) || self.exclusions.matches(url.as_str()) {
            return false;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => {
                self.notifier.notify(&value);
                true
            }
            Err(e) => {
                debug!("Not notifying for {url} ({status}): body is not JSON: {e}");
                false
            }
        }
    }
}
