//! Data models for the LINSTOR API.
//!
//! Return codes and the reply wrapper carry real contracts. The domain types
//! mirror the controller's JSON and tolerate fields the controller omits.

pub mod api_call_rc;
pub mod api_response;
pub mod controller;
pub mod encryption;
pub mod kvs;
pub mod node;
pub mod props;
pub mod remote;
pub mod resource;
pub mod resource_group;
pub mod schedule;
mod secret;
pub mod snapshot;
pub mod storage_pool;
