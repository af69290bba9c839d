//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use hashscan_config::Config;
    use hashscan_errors::{Error, NetworkError};
    use hashscan_net::*;
    use hashscan_types::Hash;
    use httpmock::prelude::*;
    use serde_json::json;

    const HASH: &str = "44d88612fea8a8f36de82e1278abb02f";

    fn client_for(server: &MockServer, api_key: &str) -> VirusTotalClient {
        let mut config = Config::default();
        config.api.base_url = server.url("/api/v3");
        config.api.api_key = api_key.to_string();
        VirusTotalClient::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_parses_report_and_sends_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/api/v3/files/{HASH}"))
                    .header("x-apikey", "test-key");
                then.status(200).json_body(json!({
                    "data": {
                        "id": HASH,
                        "type": "file",
                        "attributes": {
                            "last_analysis_stats": { "malicious": 5, "suspicious": 1 }
                        }
                    }
                }));
            })
            .await;

        let client = client_for(&server, "test-key");
        let response = client.lookup(&Hash::new(HASH)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert!(response.success);
        assert_eq!(response.body.unwrap().malicious_count(), 5);
    }

    #[tokio::test]
    async fn test_lookup_not_found_is_a_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/v3/files/{HASH}"));
                then.status(404)
                    .json_body(json!({ "error": { "code": "NotFoundError" } }));
            })
            .await;

        let response = client_for(&server, "k")
            .lookup(&Hash::new(HASH))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.success);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_lookup_server_error_is_a_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/v3/files/{HASH}"));
                then.status(503);
            })
            .await;

        let response = client_for(&server, "k")
            .lookup(&Hash::new(HASH))
            .await
            .unwrap();
        assert_eq!(response, LookupResponse::status_only(503));
    }

    #[tokio::test]
    async fn test_lookup_unparseable_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/v3/files/{HASH}"));
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let response = client_for(&server, "k")
            .lookup(&Hash::new(HASH))
            .await
            .unwrap();
        assert!(response.success);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_lookup_connection_failure_is_an_error() {
        let mut config = Config::default();
        // port 9 (discard) on localhost is closed in test environments
        config.api.base_url = "http://127.0.0.1:9/api/v3".to_string();
        config.api.connect_timeout_secs = 2;
        let client = VirusTotalClient::from_config(&config).unwrap();

        let err = client.lookup(&Hash::new(HASH)).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_rejects_key_with_newline() {
        let result = NetClient::new(NetConfig {
            api_key: Some("bad\nkey".to_string()),
            ..NetConfig::default()
        });
        assert!(matches!(
            result,
            Err(Error::Network(NetworkError::InvalidHeader { .. }))
        ));
    }
}
