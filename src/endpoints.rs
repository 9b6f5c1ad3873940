//! URL templates of the controller REST API.
//!
//! `{name}` placeholders are filled from [`crate::RequestParams::path`].

pub const CONTROLLER_VERSION: &str = "/v1/controller/version";

pub const NODES: &str = "/v1/nodes";
pub const NODE: &str = "/v1/nodes/{node}";
pub const NODE_LOST: &str = "/v1/nodes/{node}/lost";
pub const NODE_RECONNECT: &str = "/v1/nodes/{node}/reconnect";
pub const NODE_EVACUATE: &str = "/v1/nodes/{node}/evacuate";
pub const NODE_NET_INTERFACES: &str = "/v1/nodes/{node}/net-interfaces";
pub const NODE_NET_INTERFACE: &str = "/v1/nodes/{node}/net-interfaces/{netif}";

pub const NODE_STORAGE_POOLS: &str = "/v1/nodes/{node}/storage-pools";
pub const NODE_STORAGE_POOL: &str = "/v1/nodes/{node}/storage-pools/{storagepool}";
pub const VIEW_STORAGE_POOLS: &str = "/v1/view/storage-pools";

pub const RESOURCE_DEFINITIONS: &str = "/v1/resource-definitions";
pub const RESOURCE_DEFINITION: &str = "/v1/resource-definitions/{resource}";
pub const VOLUME_DEFINITIONS: &str = "/v1/resource-definitions/{resource}/volume-definitions";
pub const AUTOPLACE: &str = "/v1/resource-definitions/{resource}/autoplace";

pub const RESOURCES: &str = "/v1/resource-definitions/{resource}/resources";
pub const RESOURCE: &str = "/v1/resource-definitions/{resource}/resources/{node}";
pub const RESOURCE_MIGRATE_DISK: &str =
    "/v1/resource-definitions/{resource}/resources/{node}/migrate-disk/{fromnode}";
pub const RESOURCE_TOGGLE_DISKFUL: &str =
    "/v1/resource-definitions/{resource}/resources/{node}/toggle-disk/diskful";
pub const RESOURCE_TOGGLE_DISKLESS: &str =
    "/v1/resource-definitions/{resource}/resources/{node}/toggle-disk/diskless";
pub const VIEW_RESOURCES: &str = "/v1/view/resources";

pub const RESOURCE_GROUPS: &str = "/v1/resource-groups";
pub const RESOURCE_GROUP: &str = "/v1/resource-groups/{resource_group}";
pub const RESOURCE_GROUP_SPAWN: &str = "/v1/resource-groups/{resource_group}/spawn";

pub const SNAPSHOTS: &str = "/v1/resource-definitions/{resource}/snapshots";
pub const SNAPSHOT: &str = "/v1/resource-definitions/{resource}/snapshots/{snapshot}";
pub const SNAPSHOT_ROLLBACK: &str = "/v1/resource-definitions/{resource}/snapshot-rollback/{snapshot}";
pub const SNAPSHOT_RESTORE: &str =
    "/v1/resource-definitions/{resource}/snapshot-restore-resource/{snapshot}";
pub const VIEW_SNAPSHOTS: &str = "/v1/view/snapshots";

pub const REMOTES: &str = "/v1/remotes";
pub const REMOTES_S3: &str = "/v1/remotes/s3";
pub const REMOTES_LINSTOR: &str = "/v1/remotes/linstor";
pub const REMOTE_BACKUPS: &str = "/v1/remotes/{remote_name}/backups";
pub const BACKUP_SCHEDULE_ENABLE: &str =
    "/v1/remotes/{remote_name}/backups/schedule/{schedule_name}/enable";
pub const BACKUP_SCHEDULE_DISABLE: &str =
    "/v1/remotes/{remote_name}/backups/schedule/{schedule_name}/disable";
pub const BACKUP_SCHEDULE_DELETE: &str =
    "/v1/remotes/{remote_name}/backups/schedule/{schedule_name}/delete";

pub const SCHEDULES: &str = "/v1/schedules";
pub const SCHEDULE: &str = "/v1/schedules/{scheduleName}";
pub const VIEW_SCHEDULES_BY_RESOURCE: &str = "/v1/view/schedules-by-resource";

pub const KEY_VALUE_STORE: &str = "/v1/key-value-store";
pub const KEY_VALUE_STORE_INSTANCE: &str = "/v1/key-value-store/{instance}";

pub const ENCRYPTION_PASSPHRASE: &str = "/v1/encryption/passphrase";

pub const STATS_NODES: &str = "/v1/stats/nodes";
pub const STATS_RESOURCES: &str = "/v1/stats/resources";
pub const STATS_RESOURCE_DEFINITIONS: &str = "/v1/stats/resource-definitions";
pub const STATS_STORAGE_POOLS: &str = "/v1/stats/storage-pools";
