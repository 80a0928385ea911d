use std::path::Path;

use cube_utils::http_client::HttpClient;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::Part;
use reqwest::Body;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::api::CubeApiOperations;
use crate::config::CubeConfig;
use crate::constants::{API_KEY_HEADER, DELETE_OPERATION, NEW_CLIENT_OPERATION, UPLOAD_OPERATION};
use crate::error::CubeError;
use crate::types::{UploadOptions, UploadResult};

/// Client for the Cube object-storage service.
///
/// Holds the validated configuration and one transport; both are fixed at construction, so a
/// single client can be shared by reference across tasks.
#[derive(Debug, Clone)]
pub struct CubeClient {
    config: CubeConfig,
    client: HttpClient,
}

impl CubeClient {
    /// Validates `config` and sets up the transport.
    ///
    /// `transport` lets callers share an existing `reqwest::Client` (and its connection pool);
    /// when `None` a new one is created. Either way the base URL, timeout and `Key` header
    /// from `config` apply to every request made by this client. A zero timeout is replaced
    /// by [DEFAULT_TIMEOUT](crate::constants::DEFAULT_TIMEOUT) in the stored configuration.
    pub fn new(
        config: impl Into<Option<CubeConfig>>,
        transport: Option<reqwest::Client>,
    ) -> Result<Self, CubeError> {
        let Some(mut config) = config.into() else {
            return Err(CubeError::config(NEW_CLIENT_OPERATION, "configuration is required"));
        };
        config.validate(NEW_CLIENT_OPERATION)?;
        config.timeout = config.effective_timeout();

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| CubeError::config(NEW_CLIENT_OPERATION, format!("API key is not a valid header value: {e}")))?;
        api_key.set_sensitive(true);

        let mut builder = HttpClient::builder(&config.base_url)
            .map_err(|e| CubeError::config(NEW_CLIENT_OPERATION, e.to_string()))?
            .timeout(config.timeout)
            .default_header(HeaderName::from_static(API_KEY_HEADER), api_key);
        if let Some(transport) = transport {
            builder = builder.client(transport);
        }
        let client = builder.build().map_err(|e| CubeError::config(NEW_CLIENT_OPERATION, e.to_string()))?;

        info!(
            base_url = %client.base_url(),
            timeout = ?config.timeout,
            enabled = config.enable,
            bucket = %config.default_bucket_name,
            "Cube client initialized"
        );

        Ok(Self { config, client })
    }

    /// Like [CubeClient::new], but returns `Ok(None)` without validating anything when the
    /// configuration is disabled.
    pub fn from_enabled_config(config: CubeConfig, transport: Option<reqwest::Client>) -> Result<Option<Self>, CubeError> {
        if !config.enable {
            debug!("Cube storage is disabled, not creating a client");
            return Ok(None);
        }
        Self::new(config, transport).map(Some)
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.client
    }

    /// Uploads a local file and returns the object key assigned by the service.
    ///
    /// An empty `location` is not sent at all.
    pub async fn upload_file(
        &self,
        local_path: impl AsRef<Path>,
        location: &str,
        convert_webp: bool,
        use_uuid: bool,
    ) -> Result<String, CubeError> {
        let options = UploadOptions::new().location(location).convert_webp(convert_webp).use_uuid(use_uuid);
        self.upload_file_detailed(local_path, &options).await.map(|result| result.object_key)
    }

    /// Uploads a local file and returns everything the service reported about it.
    ///
    /// The file is streamed from disk. Its handle belongs to the request body and is closed
    /// once the request finishes, whatever the outcome.
    #[tracing::instrument(
        skip_all,
        fields(path = %local_path.as_ref().display(), location = ?options.location, convert_webp = options.convert_webp, use_uuid = options.use_uuid)
    )]
    pub async fn upload_file_detailed(
        &self,
        local_path: impl AsRef<Path>,
        options: &UploadOptions,
    ) -> Result<UploadResult, CubeError> {
        let bucket = self.config.require_bucket_name(UPLOAD_OPERATION)?;
        let local_path = local_path.as_ref();

        let file = File::open(local_path).await.map_err(|e| CubeError::file(UPLOAD_OPERATION, local_path, e))?;
        let length = file.metadata().await.map_err(|e| CubeError::file(UPLOAD_OPERATION, local_path, e))?.len();
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| local_path.to_string_lossy().into_owned());

        debug!(file_name = %file_name, size_bytes = length, "Streaming file to Cube");

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length).file_name(file_name);
        let response = CubeApiOperations::build_upload_request(self.client.request(), bucket, part, options)
            .send()
            .await
            .map_err(|e| CubeError::network(UPLOAD_OPERATION, e))
            .inspect_err(|e| warn!(error = %e, error_type = e.error_type(), "Cube upload request failed"))?;

        let data = CubeApiOperations::parse_envelope_response(response, UPLOAD_OPERATION).await?;
        let result = UploadResult::try_from(data)
            .inspect_err(|e| warn!(code = e.code, error_type = "service_error", "Cube upload returned no object key"))?;

        debug!(object_key = %result.object_key, file_id = ?result.file_id, "File uploaded");
        Ok(result)
    }

    /// Deletes an object from the default bucket.
    ///
    /// Whether deleting a key that does not exist succeeds is up to the service; its envelope
    /// is reported as-is.
    #[tracing::instrument(skip(self))]
    pub async fn delete_file(&self, object_key: &str) -> Result<(), CubeError> {
        let bucket = self.config.require_bucket_name(DELETE_OPERATION)?;

        let response = CubeApiOperations::build_delete_request(self.client.request(), bucket, object_key)
            .send()
            .await
            .map_err(|e| CubeError::network(DELETE_OPERATION, e))
            .inspect_err(|e| warn!(error = %e, error_type = e.error_type(), "Cube delete request failed"))?;

        CubeApiOperations::parse_envelope_response(response, DELETE_OPERATION).await?;

        debug!("File deleted");
        Ok(())
    }

    /// Public URL for an object in the default bucket. No request is made.
    pub fn get_file_url(&self, object_key: &str, thumbnail: bool) -> String {
        CubeApiOperations::build_file_url(
            &self.config.base_url,
            &self.config.default_bucket_name,
            object_key,
            thumbnail,
        )
    }
}
