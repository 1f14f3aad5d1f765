use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A hosted identity provider stub built on `wiremock`, serving
/// `POST /oauth2/token`.
pub struct MockIdentityProvider {
    server: MockServer,
}

impl MockIdentityProvider {
    /// Start a new mock server on a random available port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server (e.g. "http://127.0.0.1:PORT").
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Respond to the token endpoint with HTTP 200 and `response`.
    pub async fn mock_token_success(&self, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Respond with an RFC 6749 error body (HTTP 400).
    pub async fn mock_token_error(&self, error_code: &str, description: &str) {
        let body = serde_json::json!({
            "error": error_code,
            "error_description": description,
        });
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&body))
            .mount(&self.server)
            .await;
    }

    /// Respond with `status` and an empty body.
    pub async fn mock_token_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .expect("request recording enabled")
            .len()
    }

    /// Assert that the last request carried the expected form parameters
    /// and content type.
    pub async fn verify_token_request(&self, expected_params: &[(&str, &str)]) {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests.last().expect("expected at least one request");

        let content_type = last
            .headers
            .get("content-type")
            .expect("expected Content-Type header");
        assert_eq!(
            content_type.to_str().unwrap(),
            "application/x-www-form-urlencoded"
        );

        let body_str = String::from_utf8(last.body.clone()).expect("body should be UTF-8");
        let parsed: Vec<(String, String)> = url::form_urlencoded::parse(body_str.as_bytes())
            .into_owned()
            .collect();

        for (key, value) in expected_params {
            let found = parsed.iter().any(|(k, v)| k == key && v == value);
            assert!(
                found,
                "expected form param {}={} in request body, got: {}",
                key, value, body_str
            );
        }
    }
}
