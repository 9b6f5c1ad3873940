use reqwest::StatusCode;
use serde::Deserialize;

use crate::models::api_call_rc::ApiCallRcList;
use crate::outcome::BatchOutcome;
use crate::LinstorError;

/// Result of a single gateway call that reached the controller.
///
/// Transport failures never show up here; they are returned as
/// [`LinstorError::HttpError`] by the gateway itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T, E = ApiCallRcList> {
    /// 2xx response whose body decoded as `T`.
    Data(T),
    /// Non-2xx response, or a 2xx body that did not decode as `T`.
    Error(ApiFailure<E>),
}

/// The failing half of an [`ApiReply`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure<E = ApiCallRcList> {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// The body decoded as the endpoint's error shape, if it decoded.
    pub error: Option<E>,
    /// Raw response body.
    pub body: String,
}

impl<T, E> ApiReply<T, E> {
    /// Returns the data if the call succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiReply::Data(data) => Some(data),
            ApiReply::Error(_) => None,
        }
    }

    /// Returns the failure if the call did not succeed.
    pub fn failure(&self) -> Option<&ApiFailure<E>> {
        match self {
            ApiReply::Data(_) => None,
            ApiReply::Error(failure) => Some(failure),
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, ApiReply::Data(_))
    }

    /// Converts the reply into a plain `Result`.
    pub fn into_result(self) -> Result<T, ApiFailure<E>> {
        match self {
            ApiReply::Data(data) => Ok(data),
            ApiReply::Error(failure) => Err(failure),
        }
    }
}

impl<T> ApiReply<T, ApiCallRcList> {
    /// Returns the data, or a [`LinstorError::RequestFailed`] carrying
    /// `context` and whatever return codes the error body held.
    pub fn require(self, context: impl FnOnce() -> String) -> Result<T, LinstorError> {
        match self {
            ApiReply::Data(data) => Ok(data),
            ApiReply::Error(failure) => Err(LinstorError::RequestFailed {
                context: context(),
                status: failure.status,
                reports: failure.error.unwrap_or_default(),
            }),
        }
    }
}

impl ApiReply<ApiCallRcList> {
    /// Classifies a batch mutation reply.
    ///
    /// Only the data side is considered: an error reply classifies the same
    /// way as an absent list.
    pub fn outcome(&self) -> BatchOutcome {
        BatchOutcome::classify(self.data().map(Vec::as_slice))
    }

    /// Return codes from either side of the reply.
    pub fn reports(&self) -> &[crate::ApiCallRc] {
        match self {
            ApiReply::Data(list) => list,
            ApiReply::Error(failure) => failure.error.as_deref().unwrap_or_default(),
        }
    }
}

/// List endpoints answer either with a bare array or with the array wrapped
/// in a `data` member.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> ListBody<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Wrapped { data } => data,
        }
    }
}

/// Empty response type for endpoints that don't return meaningful data.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct EmptyResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiCallRc;

    fn failure(status: StatusCode, error: Option<ApiCallRcList>) -> ApiReply<ApiCallRcList> {
        ApiReply::Error(ApiFailure {
            status,
            error,
            body: String::new(),
        })
    }

    #[test]
    fn require_maps_failure_to_request_failed() {
        let reply = failure(
            StatusCode::NOT_FOUND,
            Some(vec![ApiCallRc::new(-1, "Resource definition 'r0' not found")]),
        );
        let err = reply.require(|| "Failed to get resource definition r0".into()).unwrap_err();
        match &err {
            LinstorError::RequestFailed { context, status, reports } => {
                assert_eq!(context, "Failed to get resource definition r0");
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(reports.len(), 1);
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
        assert_eq!(err.controller_message(), Some("Resource definition 'r0' not found"));
    }

    #[test]
    fn list_body_accepts_both_shapes() {
        let bare: ListBody<u32> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);
        let wrapped: ListBody<u32> = serde_json::from_str(r#"{"data": [3]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![3]);
        let empty: ListBody<u32> = serde_json::from_str("{}").unwrap();
        assert!(empty.into_vec().is_empty());
    }

    #[test]
    fn error_reply_classifies_as_unknown() {
        let reply = failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(vec![ApiCallRc::new(1, "ok"), ApiCallRc::new(-1, "fail")]),
        );
        assert_eq!(reply.outcome(), BatchOutcome::Unknown);
        assert_eq!(reply.reports().len(), 2);
        assert!(failure(StatusCode::BAD_REQUEST, None).reports().is_empty());
    }
}
