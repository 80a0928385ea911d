use std::time::Duration;

/// Timeout used when the configured one is zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const UPLOAD_PATH: &str = "/api/upload";
pub const DELETE_PATH: &str = "/api/delete";
pub const FILE_PATH: &str = "/api/file";

/// Header carrying the API key. The service documents it as `Key`; header names are
/// case-insensitive and `http` only stores them lowercase.
pub(crate) const API_KEY_HEADER: &str = "key";

// Multipart fields and query parameters understood by the service
pub(crate) const FIELD_FILE: &str = "file";
pub(crate) const FIELD_BUCKET: &str = "bucket";
pub(crate) const FIELD_CONVERT_WEBP: &str = "convert_webp";
pub(crate) const FIELD_USE_UUID: &str = "use_uuid";
pub(crate) const FIELD_LOCATION: &str = "location";
pub(crate) const FIELD_OBJECT_KEY: &str = "object_key";
pub(crate) const FIELD_THUMBNAIL: &str = "thumbnail";

/// Envelope `code` that marks a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Code reported when an upload envelope says success but carries no object key.
pub const MISSING_OBJECT_KEY_CODE: i64 = 200500;
pub const MISSING_OBJECT_KEY_MESSAGE: &str = "upload succeeded but object key is missing";

// Operation names used in errors and log fields
pub(crate) const NEW_CLIENT_OPERATION: &str = "new_client";
pub(crate) const UPLOAD_OPERATION: &str = "upload_file";
pub(crate) const DELETE_OPERATION: &str = "delete_file";
pub(crate) const LOAD_CONFIG_OPERATION: &str = "load_config";
