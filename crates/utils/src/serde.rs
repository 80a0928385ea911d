use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::parsers::parse_duration;

/// Reads a duration written as a human string (`"10s"`, `"500ms"`, ...).
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Settings {
        #[serde(deserialize_with = "deserialize_duration")]
        timeout: Duration,
    }

    #[test]
    fn duration_fields_read_human_strings() {
        let settings: Settings = serde_json::from_str(r#"{"timeout":"1500ms"}"#).unwrap();
        assert_eq!(settings.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn malformed_duration_is_a_deserialization_error() {
        let err = serde_json::from_str::<Settings>(r#"{"timeout":"soon"}"#).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }
}
