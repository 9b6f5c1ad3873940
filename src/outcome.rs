//! Classification of batch return codes.
//!
//! A single controller request can touch many objects (a resource on several
//! nodes, a group of volume definitions) and reports one [`ApiCallRc`] per
//! object. These helpers decide what the batch as a whole means,
//! independent of the HTTP status.

use crate::models::api_call_rc::ApiCallRc;

/// Returns true if every return code in the batch reports success.
///
/// An absent list is never a success. An empty list is vacuously a success.
pub fn fully_success(list: Option<&[ApiCallRc]>) -> bool {
    match list {
        Some(list) => list.iter().all(ApiCallRc::is_success),
        None => false,
    }
}

/// Returns true if the batch mixes successful and failed sub-operations.
///
/// An absent or empty list is never a partial success.
pub fn partially_success(list: Option<&[ApiCallRc]>) -> bool {
    match list {
        Some(list) => {
            list.iter().any(ApiCallRc::is_error) && list.iter().any(ApiCallRc::is_success)
        }
        None => false,
    }
}

/// Overall result of a batch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every sub-operation succeeded.
    Success,
    /// Some sub-operations succeeded and some failed.
    Partial,
    /// Nothing succeeded.
    Failure,
    /// No return codes were available.
    Unknown,
}

impl BatchOutcome {
    pub fn classify(list: Option<&[ApiCallRc]>) -> Self {
        if list.is_none() {
            BatchOutcome::Unknown
        } else if fully_success(list) {
            BatchOutcome::Success
        } else if partially_success(list) {
            BatchOutcome::Partial
        } else {
            BatchOutcome::Failure
        }
    }

    pub fn is_success(self) -> bool {
        self == BatchOutcome::Success
    }
}
