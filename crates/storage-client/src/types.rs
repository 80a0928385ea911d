use serde::Deserialize;

use crate::constants::SUCCESS_CODE;
use crate::error::ServiceError;

/// Uniform JSON wrapper the Cube service puts around every response.
///
/// Success is signalled only by `code`, so callers should go through
/// [ResponseEnvelope::into_result] rather than inspecting the fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    /// Absent or `null` on most failures
    #[serde(default)]
    pub data: Option<EnvelopeData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnvelopeData {
    pub object_key: String,
    pub url: String,
    pub file_id: String,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn into_result(self) -> Result<EnvelopeData, ServiceError> {
        if self.is_success() {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(ServiceError::new(self.code, self.msg))
        }
    }
}

/// What a successful upload returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Key assigned by the service, never empty
    pub object_key: String,
    pub url: Option<String>,
    pub file_id: Option<String>,
}

impl TryFrom<EnvelopeData> for UploadResult {
    type Error = ServiceError;

    fn try_from(data: EnvelopeData) -> Result<Self, Self::Error> {
        if data.object_key.is_empty() {
            return Err(ServiceError::missing_object_key());
        }

        Ok(Self {
            object_key: data.object_key,
            url: Some(data.url).filter(|url| !url.is_empty()),
            file_id: Some(data.file_id).filter(|id| !id.is_empty()),
        })
    }
}

/// Per-upload switches sent as form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Folder-like prefix inside the bucket. `None` (or an empty string) omits the field.
    pub location: Option<String>,
    /// Ask the service to convert images to WebP
    pub convert_webp: bool,
    /// Ask the service to name the object with a UUID instead of the file name
    pub use_uuid: bool,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn convert_webp(mut self, convert_webp: bool) -> Self {
        self.convert_webp = convert_webp;
        self
    }

    pub fn use_uuid(mut self, use_uuid: bool) -> Self {
        self.use_uuid = use_uuid;
        self
    }

    /// The location to send, if any.
    pub(crate) fn location_field(&self) -> Option<&str> {
        self.location.as_deref().filter(|location| !location.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn success_envelope_yields_data() {
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"code":200,"msg":"ok","data":{"object_key":"img/a.png","url":"https://cdn/a.png","file_id":"42"}}"#,
        )
        .unwrap();

        let data = envelope.into_result().unwrap();
        assert_eq!(data.object_key, "img/a.png");
        assert_eq!(data.url, "https://cdn/a.png");
        assert_eq!(data.file_id, "42");
    }

    #[test]
    fn failure_envelope_yields_service_error() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"code":403,"msg":"forbidden","data":null}"#).unwrap();
        assert_eq!(envelope.into_result(), Err(ServiceError::new(403, "forbidden")));
    }

    #[test]
    fn envelope_without_data_still_decodes() {
        let envelope: ResponseEnvelope = serde_json::from_str(r#"{"code":200}"#).unwrap();
        assert_eq!(envelope.msg, "");
        assert_eq!(envelope.into_result().unwrap(), EnvelopeData::default());
    }

    #[test]
    fn envelope_without_code_is_rejected() {
        assert!(serde_json::from_str::<ResponseEnvelope>(r#"{"msg":"ok"}"#).is_err());
    }

    #[test]
    fn upload_result_requires_object_key() {
        let err = UploadResult::try_from(EnvelopeData::default()).unwrap_err();
        assert_eq!(err, ServiceError::missing_object_key());

        let result = UploadResult::try_from(EnvelopeData {
            object_key: "k".to_string(),
            url: String::new(),
            file_id: "id-1".to_string(),
        });
        assert_matches!(result, Ok(UploadResult { ref object_key, url: None, file_id: Some(ref id) })
            if object_key == "k" && id == "id-1");
    }

    #[test]
    fn empty_location_is_not_sent() {
        assert_eq!(UploadOptions::new().location_field(), None);
        assert_eq!(UploadOptions::new().location("").location_field(), None);
        assert_eq!(UploadOptions::new().location("x").location_field(), Some("x"));
    }
}
