use chrono::Utc;
use log::debug;

use super::RcReply;
use crate::models::kvs::{stamp_update, KeyValueStore};
use crate::models::props::PropsModify;
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Provides access to the controller's key-value store.
///
/// The store holds small named property maps that clients use for their own
/// settings. Every modification made through this handler records its time
/// under `__updated__`.
#[derive(Debug, Clone)]
pub struct KeyValueStoreHandler {
    client: LinstorClient,
}

fn instance_params(instance: &str) -> RequestParams {
    RequestParams::new().path("instance", instance)
}

impl KeyValueStoreHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Lists every key-value store instance.
    pub async fn list(&self) -> LinstorResult<Vec<KeyValueStore>> {
        self.client
            .get(endpoints::KEY_VALUE_STORE, RequestParams::new())
            .await?
            .require(|| "Failed to list key value stores".to_string())
    }

    /// Fetches one instance. Returns `None` if the instance holds no keys.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// if let Some(store) = client.key_value_store().get("console").await? {
    ///     println!("theme = {:?}", store.get("theme"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, instance: &str) -> LinstorResult<Option<KeyValueStore>> {
        let stores: Vec<KeyValueStore> = self
            .client
            .get(endpoints::KEY_VALUE_STORE_INSTANCE, instance_params(instance))
            .await?
            .require(|| format!("Failed to get key value store {instance}"))?;

        Ok(stores.into_iter().find(|store| store.name == instance))
    }

    /// Applies `modify` to an instance, creating it if needed.
    ///
    /// `__updated__` is set to the current UTC time in `override_props`,
    /// alongside the caller's own overrides.
    pub async fn modify(&self, instance: &str, modify: PropsModify) -> LinstorResult<RcReply> {
        let modify = stamp_update(modify, Utc::now());
        debug!(
            "Modifying key value store {instance}: {} overrides, {} deletions",
            modify.override_props.len(),
            modify.delete_props.len()
        );

        self.client
            .put(
                endpoints::KEY_VALUE_STORE_INSTANCE,
                instance_params(instance).body(&modify)?,
            )
            .await
    }

    /// Deletes an instance and all of its keys.
    pub async fn delete(&self, instance: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::KEY_VALUE_STORE_INSTANCE, instance_params(instance))
            .await
    }
}
