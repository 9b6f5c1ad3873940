//! One handler per controller domain.
//!
//! Handlers are cheap to create (`client.nodes()`, `client.snapshots()`, ...)
//! and own a clone of the client. Read operations return the decoded data or
//! a [`crate::LinstorError::RequestFailed`]. Mutations return the raw
//! [`RcReply`] so callers can classify the batch with
//! [`crate::fully_success`] and [`crate::partially_success`].

pub mod controller;
pub mod encryption;
pub mod kvs;
pub mod node;
pub mod remote;
pub mod resource;
pub mod resource_definition;
pub mod resource_group;
pub mod schedule;
pub mod snapshot;
pub mod stats;
pub mod storage_pool;

use crate::models::api_call_rc::ApiCallRcList;
use crate::models::api_response::ApiReply;

/// Reply of a mutation: the controller's return codes, or the failure.
pub type RcReply = ApiReply<ApiCallRcList>;
