//! Cube API operations layer
//!
//! Request building and response parsing for each endpoint, kept apart from the client so
//! that neither sending nor file handling leaks in here.
//!
//! | Operation | Build | Parse |
//! |-----------|-------|-------|
//! | Upload | [CubeApiOperations::build_upload_request] | [CubeApiOperations::parse_envelope_response] |
//! | Delete | [CubeApiOperations::build_delete_request] | [CubeApiOperations::parse_envelope_response] |
//! | File URL | [CubeApiOperations::build_file_url] | - |
//!
//! Response parsing classifies failures in a fixed order: non-2xx status, then a body that is
//! not an envelope, then an envelope whose `code` is not 200.

use cube_utils::http_client::{extract_http_error_text, RequestBuilder};
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::Part;
use reqwest::{Method, Response};
use tracing::{debug, warn};

use crate::constants::{
    DELETE_PATH, FIELD_BUCKET, FIELD_CONVERT_WEBP, FIELD_FILE, FIELD_LOCATION, FIELD_OBJECT_KEY, FIELD_THUMBNAIL,
    FIELD_USE_UUID, FILE_PATH, UPLOAD_PATH,
};
use crate::error::CubeError;
use crate::types::{EnvelopeData, ResponseEnvelope, UploadOptions};

/// Bytes percent-encoded in an object key: all but ASCII alphanumerics and `-_.~`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Stateless request builders and response parsers for the Cube API.
pub struct CubeApiOperations;

impl CubeApiOperations {
    // ==================== UPLOAD ====================

    /// Builds the multipart upload request.
    ///
    /// Booleans are sent as `true`/`false`. The `location` field is left out entirely when
    /// the options carry no (or an empty) location.
    pub fn build_upload_request<'a>(
        builder: RequestBuilder<'a>,
        bucket: &str,
        file: Part,
        options: &UploadOptions,
    ) -> RequestBuilder<'a> {
        debug!(
            operation = "upload_file",
            bucket = %bucket,
            location = ?options.location_field(),
            convert_webp = options.convert_webp,
            use_uuid = options.use_uuid,
            "Building upload request"
        );

        let request = builder
            .method(Method::POST)
            .path(UPLOAD_PATH)
            .form_part(FIELD_FILE, file)
            .form_text(FIELD_BUCKET, bucket)
            .form_text(FIELD_CONVERT_WEBP, &options.convert_webp.to_string())
            .form_text(FIELD_USE_UUID, &options.use_uuid.to_string());

        match options.location_field() {
            Some(location) => request.form_text(FIELD_LOCATION, location),
            None => request,
        }
    }

    // ==================== DELETE ====================

    /// Builds the delete request. The object key is passed as-is; query encoding is done
    /// by the transport.
    pub fn build_delete_request<'a>(builder: RequestBuilder<'a>, bucket: &str, object_key: &str) -> RequestBuilder<'a> {
        debug!(operation = "delete_file", bucket = %bucket, object_key = %object_key, "Building delete request");

        builder
            .method(Method::DELETE)
            .path(DELETE_PATH)
            .query_param(FIELD_BUCKET, bucket)
            .query_param(FIELD_OBJECT_KEY, object_key)
    }

    // ==================== RESPONSES ====================

    /// Turns a raw response into the envelope payload, or the first applicable error.
    pub async fn parse_envelope_response(response: Response, operation: &str) -> Result<EnvelopeData, CubeError> {
        let status = response.status();

        if !status.is_success() {
            let (body, status) = extract_http_error_text(response, operation).await;
            warn!(operation = operation, status = %status, error_type = "http_error", "Cube request failed");
            return Err(CubeError::http(operation, status, body));
        }

        let body = response.text().await.map_err(|e| CubeError::network(operation, e))?;
        let envelope: ResponseEnvelope =
            serde_json::from_str(&body).map_err(|e| CubeError::parse(operation, e.to_string(), body.as_str()))?;

        debug!(operation = operation, status = %status, code = envelope.code, "Envelope parsed");

        envelope.into_result().map_err(|e| {
            warn!(
                operation = operation,
                code = e.code,
                message = %e.message,
                error_type = "service_error",
                "Cube service rejected the request"
            );
            CubeError::Service(e)
        })
    }

    // ==================== FILE URL ====================

    /// Public URL of an object.
    ///
    /// The object key is query-escaped: alphanumerics and `-_.~` are kept, spaces become `+`.
    /// The bucket name is inserted as configured.
    pub fn build_file_url(base_url: &str, bucket: &str, object_key: &str, thumbnail: bool) -> String {
        let encoded_key: String = percent_encode(object_key.as_bytes(), QUERY_ESCAPE)
            .map(|chunk| if chunk == "%20" { "+" } else { chunk })
            .collect();
        let mut file_url = format!(
            "{}{FILE_PATH}?{FIELD_BUCKET}={bucket}&{FIELD_OBJECT_KEY}={encoded_key}",
            base_url.trim_end_matches('/')
        );
        if thumbnail {
            file_url.push_str(&format!("&{FIELD_THUMBNAIL}=true"));
        }
        file_url
    }
}
