//! Integration tests for config

#[cfg(test)]
mod tests {
    use hashscan_config::*;
    use hashscan_errors::{ConfigError, Error};
    use hashscan_types::{ColorChoice, OutputFormat};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[analyzer]
concurrency_limit = 2
min_cycle_duration_ms = 15000

[api]
base_url = "http://localhost:8080/api/v3"
api_key = "secret"

[testing]
enabled = true
sentinel_hash = "44d88612fea8a8f36de82e1278abb02f"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.analyzer.concurrency_limit, 2);
        assert_eq!(
            config.analyzer.min_cycle_duration(),
            std::time::Duration::from_secs(15)
        );
        assert_eq!(config.analyzer.refresh_interval_secs, 30);
        assert_eq!(config.api.api_key, "secret");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.active_sentinel(),
            Some("44d88612fea8a8f36de82e1278abb02f")
        );
        config.validate().unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = Config::load_from_file(std::path::Path::new("/nonexistent/hashscan.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_defaults_match_free_quota() {
        let config = Config::default();
        assert_eq!(config.analyzer.concurrency_limit, 4);
        assert_eq!(config.analyzer.min_cycle_duration_ms, 60_000);
        assert_eq!(config.api.base_url, constants::DEFAULT_API_BASE_URL);
        assert!(config.active_sentinel().is_none());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[analyzer]\nconcurrency_limit = \"four\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_merge_env() {
        let mut config = Config::default();
        config
            .merge_env_from(env(&[
                ("HASHSCAN_OUTPUT", "json"),
                ("HASHSCAN_COLOR", "always"),
                ("HASHSCAN_API_KEY", "from-env"),
                ("HASHSCAN_CONCURRENCY", "8"),
                ("HASHSCAN_MIN_CYCLE_MS", "250"),
                ("HASHSCAN_TEST_MODE", "yes"),
                ("HASHSCAN_SENTINEL_HASH", "abc"),
            ]))
            .unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.api.api_key, "from-env");
        assert_eq!(config.analyzer.concurrency_limit, 8);
        assert_eq!(config.analyzer.min_cycle_duration_ms, 250);
        assert_eq!(config.active_sentinel(), Some("abc"));
    }

    #[test]
    fn test_merge_env_rejects_bad_values() {
        let mut config = Config::default();
        let err = config
            .merge_env_from(env(&[("HASHSCAN_CONCURRENCY", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { ref field, .. }) if field == "HASHSCAN_CONCURRENCY"
        ));

        let err = config
            .merge_env_from(env(&[("HASHSCAN_TEST_MODE", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { ref field }) if field == "api.api_key"
        ));

        config.api.api_key = "   ".to_string();
        assert!(config.validate().is_err());
        config.api.api_key = "key".to_string();
        config.validate().unwrap();

        config.analyzer.concurrency_limit = 0;
        assert!(config.validate().is_err());
        config.analyzer.concurrency_limit = 4;

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.api.base_url = constants::DEFAULT_API_BASE_URL.to_string();

        config.testing.enabled = true;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { ref field }) if field == "testing.sentinel_hash"
        ));
    }

    #[test]
    fn test_test_mode_runs_without_api_key() {
        let mut config = Config::default();
        config.testing.enabled = true;
        config.testing.sentinel_hash = "44d88612fea8a8f36de82e1278abb02f".to_string();
        config.validate().unwrap();
    }

    #[test]
    fn test_env_api_key_is_taken_verbatim() {
        let mut config = Config::from_toml_str(
            "[api]\napi_key = \"c2VjcmV0\"\napi_key_encoding = \"base64\"",
        )
        .unwrap();
        assert_eq!(config.resolved_api_key().unwrap(), "secret");

        config
            .merge_env_from(env(&[("HASHSCAN_API_KEY", "raw-env-key")]))
            .unwrap();
        assert_eq!(config.api.api_key_encoding, ApiKeyEncoding::Plain);
        assert_eq!(config.resolved_api_key().unwrap(), "raw-env-key");
        config.validate().unwrap();
    }

    #[test]
    fn test_base64_api_key() {
        let mut config = Config::default();
        config.api.api_key = "c2VjcmV0LWtleQ==".to_string();
        config.api.api_key_encoding = ApiKeyEncoding::Base64;
        assert_eq!(config.resolved_api_key().unwrap(), "secret-key");

        config.api.api_key = "%%%".to_string();
        assert!(config.resolved_api_key().is_err());
        assert!(config.validate().is_err());
    }
}
