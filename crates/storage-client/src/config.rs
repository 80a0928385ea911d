use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use cube_utils::env_utils::get_env_var_optional;
use cube_utils::parsers::parse_duration;
use cube_utils::serde::deserialize_duration;
use serde::Deserialize;

use crate::constants::{DEFAULT_TIMEOUT, LOAD_CONFIG_OPERATION};
use crate::error::CubeError;

pub const ENV_ENABLE: &str = "CUBE_ENABLE";
pub const ENV_BASE_URL: &str = "CUBE_BASE_URL";
pub const ENV_API_KEY: &str = "CUBE_API_KEY";
pub const ENV_BUCKET_KEY: &str = "CUBE_BUCKET_KEY";
pub const ENV_BUCKET_NAME: &str = "CUBE_BUCKET_NAME";
pub const ENV_TIMEOUT: &str = "CUBE_TIMEOUT";

/// Connection settings for the Cube storage service.
///
/// Deserializes from the keys `enable`, `baseUrl`, `apiKey`, `bucketKey`, `bucketName` and
/// `timeout` (a duration string such as `"10s"`). Missing keys take their [Default] value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CubeConfig {
    /// Whether the host application should use the storage service at all
    pub enable: bool,
    pub base_url: String,
    pub api_key: String,
    /// Business identifier of the default bucket
    #[serde(rename = "bucketKey")]
    pub default_bucket_key: String,
    /// Bucket used by uploads, deletes and file URLs
    #[serde(rename = "bucketName")]
    pub default_bucket_name: String,
    /// Per-request timeout. Zero means [DEFAULT_TIMEOUT].
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            enable: false,
            base_url: String::new(),
            api_key: String::new(),
            default_bucket_key: String::new(),
            default_bucket_name: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for CubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubeConfig")
            .field("enable", &self.enable)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("default_bucket_key", &self.default_bucket_key)
            .field("default_bucket_name", &self.default_bucket_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CubeConfig {
    /// Loads the configuration from `CUBE_*` environment variables.
    ///
    /// Unset variables keep their default value. A `CUBE_ENABLE` that is not `true`/`false`
    /// or a `CUBE_TIMEOUT` that is not a duration string is a configuration error.
    pub fn from_env() -> Result<Self, CubeError> {
        let mut config = Self::default();

        if let Some(enable) = read_env(ENV_ENABLE)? {
            config.enable = bool::from_str(enable.trim()).map_err(|e| {
                CubeError::config(LOAD_CONFIG_OPERATION, format!("{ENV_ENABLE}={enable:?} is not a boolean: {e}"))
            })?;
        }
        if let Some(base_url) = read_env(ENV_BASE_URL)? {
            config.base_url = base_url;
        }
        if let Some(api_key) = read_env(ENV_API_KEY)? {
            config.api_key = api_key;
        }
        if let Some(bucket_key) = read_env(ENV_BUCKET_KEY)? {
            config.default_bucket_key = bucket_key;
        }
        if let Some(bucket_name) = read_env(ENV_BUCKET_NAME)? {
            config.default_bucket_name = bucket_name;
        }
        if let Some(timeout) = read_env(ENV_TIMEOUT)? {
            config.timeout = parse_duration(&timeout).map_err(|e| {
                CubeError::config(LOAD_CONFIG_OPERATION, format!("{ENV_TIMEOUT}={timeout:?} is not a duration: {e}"))
            })?;
        }

        Ok(config)
    }

    /// The timeout requests will actually use.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    pub(crate) fn validate(&self, operation: &str) -> Result<(), CubeError> {
        if self.base_url.is_empty() {
            return Err(CubeError::config(operation, "base URL is not configured"));
        }
        Ok(())
    }

    pub(crate) fn require_bucket_name(&self, operation: &str) -> Result<&str, CubeError> {
        if self.default_bucket_name.is_empty() {
            return Err(CubeError::config(operation, "default bucket name is not configured"));
        }
        Ok(&self.default_bucket_name)
    }
}

fn read_env(key: &str) -> Result<Option<String>, CubeError> {
    get_env_var_optional(key)
        .map_err(|e| CubeError::config(LOAD_CONFIG_OPERATION, format!("failed to read {key}: {e}")))
}
