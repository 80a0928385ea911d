//! Client for the Cube object-storage HTTP API.
//!
//! Three operations are exposed by [CubeClient]: uploading a local file, deleting a stored
//! object, and building the public URL of a stored object. The client is a stateless layer
//! over one HTTP transport: there is no caching and failed calls are never retried.
//!
//! ```ignore
//! let config = CubeConfig::from_env()?;
//! let client = CubeClient::new(config, None)?;
//!
//! let key = client.upload_file("./avatar.png", "avatars", true, false).await?;
//! let url = client.get_file_url(&key, true);
//! client.delete_file(&key).await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use crate::client::CubeClient;
pub use crate::config::CubeConfig;
pub use crate::error::{CubeError, ServiceError};
pub use crate::types::{EnvelopeData, ResponseEnvelope, UploadOptions, UploadResult};
