use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "default-client")]
use arc_swap::ArcSwapOption;
use log::debug;
#[cfg(feature = "default-client")]
use once_cell::sync::Lazy;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::controller::ControllerHandler;
use crate::api::encryption::EncryptionHandler;
use crate::api::kvs::KeyValueStoreHandler;
use crate::api::node::NodeHandler;
use crate::api::remote::RemoteHandler;
use crate::api::resource::ResourceHandler;
use crate::api::resource_definition::ResourceDefinitionHandler;
use crate::api::resource_group::ResourceGroupHandler;
use crate::api::schedule::ScheduleHandler;
use crate::api::snapshot::SnapshotHandler;
use crate::api::stats::StatsHandler;
use crate::api::storage_pool::StoragePoolHandler;
use crate::interceptor::{ExclusionList, Notifier, ResponseInterceptor};
use crate::models::api_response::{ApiFailure, ApiReply};
use crate::request::{self, RequestParams};
use crate::{LinstorError, LinstorResult};

#[cfg(feature = "default-client")]
static LINSTOR_CLIENT: Lazy<ArcSwapOption<LinstorClient>> = Lazy::new(ArcSwapOption::empty);

/// Installs the process-wide default client. Call once at startup; a later
/// call replaces the previous client for subsequent `instance()` callers.
#[cfg(feature = "default-client")]
pub fn initialize(client: LinstorClient) {
    LINSTOR_CLIENT.store(Some(Arc::new(client)));
}

/// Returns the client installed with [`initialize`].
#[cfg(feature = "default-client")]
pub fn instance() -> LinstorResult<Arc<LinstorClient>> {
    LINSTOR_CLIENT.load_full().ok_or(LinstorError::NotInitialized)
}

/// Builder for [`LinstorClient`].
#[derive(Default)]
pub struct LinstorClientBuilder {
    controller_url: Option<String>,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<ReqwestClient>,
    notifier: Option<Arc<dyn Notifier>>,
    exclusions: Option<ExclusionList>,
}

impl LinstorClientBuilder {
    /// Sets the controller URL, e.g. `http://linstor-controller:3370`.
    pub fn controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = Some(url.into());
        self
    }

    /// Accepts self-signed controller certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Sets a per-request timeout. Requests do not time out by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom reqwest client (e.g., for testing or custom middleware).
    ///
    /// The timeout, user agent and certificate settings of this builder are
    /// ignored when a custom client is supplied.
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Sets the sink that receives inspected response bodies.
    /// Defaults to [`crate::LogNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replaces the URL substrings whose responses are not reported.
    pub fn exclusions(mut self, exclusions: ExclusionList) -> Self {
        self.exclusions = Some(exclusions);
        self
    }

    pub fn build(self) -> LinstorResult<LinstorClient> {
        let controller_url = self
            .controller_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| LinstorError::ConfigurationError("Controller URL is required".into()))
            .and_then(|url_str| {
                Url::parse(url_str.trim()).map_err(|e| {
                    LinstorError::ConfigurationError(format!("Invalid controller URL: {e}"))
                })
            })?;

        if !matches!(controller_url.scheme(), "http" | "https") || controller_url.cannot_be_a_base()
        {
            return Err(LinstorError::ConfigurationError(format!(
                "Invalid controller URL: unsupported scheme '{}'",
                controller_url.scheme()
            )));
        }

        let user_agent = self
            .user_agent
            .as_deref()
            .unwrap_or(concat!("linstor-client/", env!("CARGO_PKG_VERSION")));

        let http_client = if let Some(custom_client) = self.http_client {
            custom_client
        } else {
            let mut builder = ReqwestClient::builder()
                .danger_accept_invalid_certs(self.accept_invalid_certs)
                .user_agent(user_agent);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build().map_err(|e| {
                LinstorError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?
        };

        let interceptor = match (self.notifier, self.exclusions) {
            (None, None) => ResponseInterceptor::default(),
            (notifier, exclusions) => ResponseInterceptor::new(
                notifier.unwrap_or_else(|| Arc::new(crate::LogNotifier)),
                exclusions.unwrap_or_default(),
            ),
        };

        Ok(LinstorClient {
            controller_url,
            http_client,
            interceptor,
        })
    }
}

/// Client for the LINSTOR controller REST API.
///
/// The typed verbs (`get`, `post`, ...) are the gateway every handler goes
/// through. Each response is offered to the client's [`ResponseInterceptor`]
/// once before it is decoded for the caller. Cloning is cheap and clones
/// share the connection pool.
#[derive(Clone)]
pub struct LinstorClient {
    controller_url: Url,
    http_client: ReqwestClient,
    interceptor: ResponseInterceptor,
}

impl fmt::Debug for LinstorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinstorClient")
            .field("controller_url", &self.controller_url)
            .field("interceptor", &self.interceptor)
            .finish()
    }
}

impl LinstorClient {
    pub fn builder() -> LinstorClientBuilder {
        LinstorClientBuilder::default()
    }

    /// The controller this client talks to.
    pub fn controller_url(&self) -> &Url {
        &self.controller_url
    }

    /// Sends one request and decodes the reply.
    ///
    /// `template` is one of the paths in [`crate::endpoints`]; its
    /// placeholders are filled from `params.path`.
    ///
    /// # Errors
    ///
    /// Only failures that prevent a reply are returned as `Err`:
    /// - the template does not match the path parameters,
    /// - the request could not be sent or its body could not be read.
    ///
    /// HTTP error statuses are returned as `Ok(ApiReply::Error(_))`.
    pub async fn request<T, E>(
        &self,
        method: Method,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let url = request::build_url(&self.controller_url, template, &params)?;
        debug!("{method} {url}");

        let mut request = self.http_client.request(method, url.clone());
        if let Some(body) = &params.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        self.interceptor.inspect(&url, status, &body);

        Ok(decode_reply(status, &body))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::GET, template, params).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::POST, template, params).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::PUT, template, params).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::PATCH, template, params).await
    }

    pub async fn del<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::DELETE, template, params).await
    }

    pub async fn head<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::HEAD, template, params).await
    }

    pub async fn trace<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::TRACE, template, params).await
    }

    pub async fn options<T: DeserializeOwned>(
        &self,
        template: &str,
        params: RequestParams,
    ) -> LinstorResult<ApiReply<T>> {
        self.request(Method::OPTIONS, template, params).await
    }

    pub fn controller(&self) -> ControllerHandler {
        ControllerHandler::new(self.clone())
    }

    pub fn nodes(&self) -> NodeHandler {
        NodeHandler::new(self.clone())
    }

    pub fn storage_pools(&self) -> StoragePoolHandler {
        StoragePoolHandler::new(self.clone())
    }

    pub fn resource_definitions(&self) -> ResourceDefinitionHandler {
        ResourceDefinitionHandler::new(self.clone())
    }

    pub fn resources(&self) -> ResourceHandler {
        ResourceHandler::new(self.clone())
    }

    pub fn resource_groups(&self) -> ResourceGroupHandler {
        ResourceGroupHandler::new(self.clone())
    }

    pub fn snapshots(&self) -> SnapshotHandler {
        SnapshotHandler::new(self.clone())
    }

    pub fn remotes(&self) -> RemoteHandler {
        RemoteHandler::new(self.clone())
    }

    pub fn schedules(&self) -> ScheduleHandler {
        ScheduleHandler::new(self.clone())
    }

    pub fn key_value_store(&self) -> KeyValueStoreHandler {
        KeyValueStoreHandler::new(self.clone())
    }

    pub fn encryption(&self) -> EncryptionHandler {
        EncryptionHandler::new(self.clone())
    }

    pub fn stats(&self) -> StatsHandler {
        StatsHandler::new(self.clone())
    }
}

/// Turns a status and a fully read body into a reply.
///
/// An empty 2xx body decodes as JSON `null`.
fn decode_reply<T, E>(status: StatusCode, body: &[u8]) -> ApiReply<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    if status.is_success() {
        let payload: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            body
        };
        match serde_json::from_slice(payload) {
            Ok(data) => return ApiReply::Data(data),
            Err(e) => debug!("Successful response ({status}) did not decode: {e}"),
        }
    }

    ApiReply::Error(ApiFailure {
        status,
        error: serde_json::from_slice(body).ok(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}
