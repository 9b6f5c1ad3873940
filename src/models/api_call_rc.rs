use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome record for a single sub-operation of a controller request.
///
/// The sign of `ret_code` carries the result: positive values report success,
/// negative values report failure. The remaining bits encode the object type
/// and operation, which this crate does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallRc {
    /// Return code. Positive is success, negative is failure.
    pub ret_code: i64,

    /// Human-readable description.
    #[serde(default)]
    pub message: String,

    /// Additional diagnostic text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Why the operation failed, if the controller knows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,

    /// Suggested fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,

    /// Error report ids that can be looked up on the controller.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_report_ids: Vec<String>,

    /// Objects the operation touched, e.g. `Node` -> `alpha`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub obj_refs: BTreeMap<String, String>,

    /// Timestamp of the report as sent by the controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Return codes of one batch request, in the order the controller processed
/// the affected objects.
pub type ApiCallRcList = Vec<ApiCallRc>;

impl ApiCallRc {
    /// Creates a return code with only the mandatory fields set.
    pub fn new(ret_code: i64, message: impl Into<String>) -> Self {
        Self {
            ret_code,
            message: message.into(),
            details: None,
            cause: None,
            correction: None,
            error_report_ids: Vec::new(),
            obj_refs: BTreeMap::new(),
            created_at: None,
        }
    }

    /// Returns true if this sub-operation succeeded.
    pub fn is_success(&self) -> bool {
        self.ret_code > 0
    }

    /// Returns true if this sub-operation failed.
    pub fn is_error(&self) -> bool {
        self.ret_code < 0
    }
}

impl fmt::Display for ApiCallRc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.ret_code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}
