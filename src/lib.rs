//! # linstor-client
//!
//! An async Rust client for the LINSTOR controller REST API.
//!
//! The crate is the data layer of a LINSTOR management console: a typed
//! HTTP gateway, a response interceptor that turns controller return codes
//! into notifications, helpers that classify batch results, and one handler
//! per controller domain (nodes, storage pools, resources, snapshots,
//! backups, schedules, the key-value store, ...).
//!
//! ## Features
//!
//! - Typed verbs over URL templates with path, query and body parameters
//! - Every response inspected once for notifications, without consuming it
//! - `fully_success` / `partially_success` classification of batch replies
//! - Optional process-wide default client (`default-client` feature)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use linstor_client::{fully_success, LinstorClient, PropsModify};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LinstorClient::builder()
//!         .controller_url("http://linstor-controller:3370")
//!         .notifier(Arc::new(|body: &serde_json::Value| println!("controller says: {body}")))
//!         .build()?;
//!
//!     let version = client.controller().version().await?;
//!     println!("Connected to LINSTOR {}", version.version);
//!
//!     let reply = client
//!         .key_value_store()
//!         .modify("console", PropsModify::new().set("theme", "dark"))
//!         .await?;
//!     if !fully_success(reply.data().map(Vec::as_slice)) {
//!         eprintln!("Saving settings failed: {:?}", reply.reports());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod cron;
pub mod endpoints;
mod error;
mod interceptor;
mod models;
mod outcome;
mod request;

pub use api::controller::ControllerHandler;
pub use api::encryption::EncryptionHandler;
pub use api::kvs::KeyValueStoreHandler;
pub use api::node::{ListNodesBuilder, NodeHandler};
pub use api::remote::RemoteHandler;
pub use api::resource::{ListResourcesBuilder, ResourceHandler};
pub use api::resource_definition::{ResourceDefinitionHandler, SpawnReport, SpawnStep};
pub use api::resource_group::ResourceGroupHandler;
pub use api::schedule::{ScheduleHandler, SchedulesByResourceBuilder};
pub use api::snapshot::{ListSnapshotsBuilder, SnapshotHandler};
pub use api::stats::StatsHandler;
pub use api::storage_pool::{ListStoragePoolsBuilder, StoragePoolHandler};
pub use api::RcReply;
#[cfg(feature = "default-client")]
pub use client::{initialize, instance};
pub use client::{LinstorClient, LinstorClientBuilder};
pub use cron::CronExpr;
pub use error::{LinstorError, LinstorResult};
pub use interceptor::{
    ExclusionList, LogNotifier, NoopNotifier, Notification, NotificationLevel, Notifier,
    ResponseInterceptor,
};
pub use models::api_call_rc::{ApiCallRc, ApiCallRcList};
pub use models::api_response::{ApiFailure, ApiReply, EmptyResponse};
pub use models::controller::{ControllerVersion, ObjectCount};
pub use models::encryption::{PassphraseCreate, PassphraseEnter, PassphraseModify};
pub use models::kvs::{KeyValueStore, UPDATED_KEY};
pub use models::node::{NetInterface, Node, NodeModify};
pub use models::props::{Props, PropsModify};
pub use models::remote::{
    Backup, BackupCreate, BackupList, BackupScheduleTarget, LinstorRemote, LinstorRemoteCreate,
    RemoteList, S3Remote, S3RemoteCreate,
};
pub use models::resource::{
    AutoPlaceRequest, AutoSelectFilter, Resource, ResourceCreate, ResourceCreateSpec,
    ResourceDefinition, ResourceDefinitionCreate, ResourceDefinitionModify, ResourceState,
    VolumeDefinition, VolumeDefinitionCreate, Volume, VolumeState,
};
pub use models::resource_group::{ResourceGroup, ResourceGroupModify, ResourceGroupSpawn};
pub use models::schedule::{OnFailure, Schedule, ScheduleBuilder, ScheduleByResource, ScheduleModify};
pub use models::snapshot::{Snapshot, SnapshotCreate, SnapshotNode, SnapshotRestore, SnapshotVolumeDefinition};
pub use models::storage_pool::{StoragePool, StoragePoolCreate};
pub use outcome::{fully_success, partially_success, BatchOutcome};
pub use request::{build_url, placeholders, RequestParams};
