use std::fmt;

use log::{debug, warn};

use super::RcReply;
use crate::models::resource::{
    AutoPlaceRequest, AutoSelectFilter, ResourceDefinition, ResourceDefinitionCreate,
    ResourceDefinitionModify, VolumeDefinition, VolumeDefinitionCreate,
};
use crate::outcome::fully_success;
use crate::{endpoints, LinstorClient, LinstorError, LinstorResult, RequestParams};

/// Provides methods for managing resource definitions and their volumes.
#[derive(Debug, Clone)]
pub struct ResourceDefinitionHandler {
    client: LinstorClient,
}

fn definition_params(resource: &str) -> RequestParams {
    RequestParams::new().path("resource", resource)
}

impl ResourceDefinitionHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> LinstorResult<Vec<ResourceDefinition>> {
        self.client
            .get(endpoints::RESOURCE_DEFINITIONS, RequestParams::new())
            .await?
            .require(|| "Failed to list resource definitions".to_string())
    }

    /// Fetches one resource definition.
    ///
    /// Returns [`LinstorError::NotFound`] if the controller answers with an
    /// empty list.
    pub async fn get(&self, resource: &str) -> LinstorResult<ResourceDefinition> {
        let definitions: Vec<ResourceDefinition> = self
            .client
            .get(endpoints::RESOURCE_DEFINITION, definition_params(resource))
            .await?
            .require(|| format!("Failed to get resource definition {resource}"))?;

        definitions
            .into_iter()
            .find(|rd| rd.name == resource)
            .ok_or_else(|| LinstorError::NotFound(format!("resource definition {resource}")))
    }

    pub async fn create(
        &self,
        create: impl Into<ResourceDefinitionCreate>,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(
                endpoints::RESOURCE_DEFINITIONS,
                RequestParams::new().body(&create.into())?,
            )
            .await
    }

    pub async fn modify(
        &self,
        resource: &str,
        modify: &ResourceDefinitionModify,
    ) -> LinstorResult<RcReply> {
        self.client
            .put(endpoints::RESOURCE_DEFINITION, definition_params(resource).body(modify)?)
            .await
    }

    /// Deletes the definition and every resource deployed from it.
    pub async fn delete(&self, resource: &str) -> LinstorResult<RcReply> {
        self.client
            .del(endpoints::RESOURCE_DEFINITION, definition_params(resource))
            .await
    }

    pub async fn volume_definitions(&self, resource: &str) -> LinstorResult<Vec<VolumeDefinition>> {
        self.client
            .get(endpoints::VOLUME_DEFINITIONS, definition_params(resource))
            .await?
            .require(|| format!("Failed to list volume definitions of {resource}"))
    }

    pub async fn create_volume_definition(
        &self,
        resource: &str,
        create: impl Into<VolumeDefinitionCreate>,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(
                endpoints::VOLUME_DEFINITIONS,
                definition_params(resource).body(&create.into())?,
            )
            .await
    }

    /// Lets the controller pick nodes and storage pools for `resource`.
    pub async fn autoplace(
        &self,
        resource: &str,
        request: impl Into<AutoPlaceRequest>,
    ) -> LinstorResult<RcReply> {
        self.client
            .post(endpoints::AUTOPLACE, definition_params(resource).body(&request.into())?)
            .await
    }

    /// Creates a resource definition, one volume definition per entry of
    /// `volume_sizes_kib`, then auto-places it.
    ///
    /// Every step must be fully successful before the next one is sent.
    /// Nothing is rolled back when a step fails; the returned
    /// [`SpawnReport`] lists the replies received so far.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use linstor_client::{AutoSelectFilter, ResourceDefinition};
    ///
    /// # async fn example(client: &linstor_client::LinstorClient) -> linstor_client::LinstorResult<()> {
    /// let report = client
    ///     .resource_definitions()
    ///     .spawn(
    ///         ResourceDefinition::new("pvc-42").in_group("gold"),
    ///         &[10 * 1024 * 1024],
    ///         AutoSelectFilter::place_count(2),
    ///     )
    ///     .await?;
    ///
    /// if !report.is_complete() {
    ///     eprintln!("spawn stopped at {:?}", report.failed_step());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn spawn(
        &self,
        definition: ResourceDefinition,
        volume_sizes_kib: &[u64],
        select_filter: AutoSelectFilter,
    ) -> LinstorResult<SpawnReport> {
        let resource = definition.name.clone();
        let mut report = SpawnReport::new(resource.clone(), volume_sizes_kib.len());

        let reply = self.create(definition).await?;
        if !report.record(SpawnStep::ResourceDefinition, reply) {
            return Ok(report);
        }

        for (index, size_kib) in volume_sizes_kib.iter().enumerate() {
            let reply = self
                .create_volume_definition(&resource, VolumeDefinition::with_size_kib(*size_kib))
                .await?;
            if !report.record(SpawnStep::VolumeDefinition(index), reply) {
                return Ok(report);
            }
        }

        let reply = self.autoplace(&resource, select_filter).await?;
        report.record(SpawnStep::AutoPlace, reply);
        Ok(report)
    }
}

/// One request of [`ResourceDefinitionHandler::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStep {
    ResourceDefinition,
    /// Index into the requested volume sizes.
    VolumeDefinition(usize),
    AutoPlace,
}

impl fmt::Display for SpawnStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnStep::ResourceDefinition => f.write_str("create resource definition"),
            SpawnStep::VolumeDefinition(index) => write!(f, "create volume definition {index}"),
            SpawnStep::AutoPlace => f.write_str("auto-place"),
        }
    }
}

/// Replies collected by [`ResourceDefinitionHandler::spawn`], in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnReport {
    pub resource: String,
    pub steps: Vec<(SpawnStep, RcReply)>,
    volume_count: usize,
}

impl SpawnReport {
    fn new(resource: String, volume_count: usize) -> Self {
        Self {
            resource,
            steps: Vec::new(),
            volume_count,
        }
    }

    /// Records a reply and tells whether the flow may continue.
    fn record(&mut self, step: SpawnStep, reply: RcReply) -> bool {
        let ok = fully_success(reply.data().map(Vec::as_slice));
        if ok {
            debug!("Spawn of {}: {step} succeeded", self.resource);
        } else {
            warn!("Spawn of {}: {step} was not fully successful", self.resource);
        }
        self.steps.push((step, reply));
        ok
    }

    /// True if every step ran and each was fully successful.
    pub fn is_complete(&self) -> bool {
        self.steps.len() == self.volume_count + 2 && self.failed_step().is_none()
    }

    /// The step the flow stopped at, if it stopped early.
    pub fn failed_step(&self) -> Option<SpawnStep> {
        self.steps
            .iter()
            .find(|(_, reply)| !fully_success(reply.data().map(Vec::as_slice)))
            .map(|(step, _)| *step)
    }
}
