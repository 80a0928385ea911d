use std::sync::OnceLock;
use std::time::Duration;

use cube_storage_client::{CubeClient, CubeConfig};
use proptest::prelude::*;
use url::Url;

fn client() -> &'static CubeClient {
    static CLIENT: OnceLock<CubeClient> = OnceLock::new();
    CLIENT.get_or_init(|| {
        let config = CubeConfig {
            enable: true,
            base_url: "https://cube.example.com/".to_string(),
            api_key: "key".to_string(),
            default_bucket_key: "media".to_string(),
            default_bucket_name: "media-bucket".to_string(),
            timeout: Duration::from_secs(1),
        };
        CubeClient::new(config, None).expect("Failed to build client")
    })
}

fn query_value(file_url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(file_url).expect("file URL must parse");
    parsed.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
}

proptest! {
    #[test]
    fn object_key_round_trips_through_query(key in any::<String>(), thumbnail in any::<bool>()) {
        let file_url = client().get_file_url(&key, thumbnail);
        prop_assert_eq!(query_value(&file_url, "object_key"), Some(key));
        prop_assert_eq!(query_value(&file_url, "bucket"), Some("media-bucket".to_string()));
    }

    #[test]
    fn thumbnail_flag_controls_suffix(key in "[a-zA-Z0-9/ ._-]{0,40}") {
        let with_thumbnail = client().get_file_url(&key, true);
        prop_assert!(with_thumbnail.ends_with("&thumbnail=true"));

        let without_thumbnail = client().get_file_url(&key, false);
        prop_assert!(!without_thumbnail.contains("&thumbnail="));
        prop_assert_eq!(query_value(&without_thumbnail, "thumbnail"), None);
    }

    #[test]
    fn file_url_targets_file_endpoint(key in any::<String>()) {
        let parsed = Url::parse(&client().get_file_url(&key, false)).expect("file URL must parse");
        prop_assert_eq!(parsed.path(), "/api/file");
        prop_assert_eq!(parsed.host_str(), Some("cube.example.com"));
    }
}
