use std::future::Future;

use serde_json::Value;

/// The back-channel call to the token endpoint: always a form-encoded POST.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of the token endpoint's reply.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Any 2xx. Redirects are not followed by the exchange and count as failures.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as JSON, or `None` if it is not JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// The RFC 6749 Section 5.2 `error` field of an error reply.
    pub fn error_code(&self) -> Option<String> {
        self.json()?.get("error")?.as_str().map(String::from)
    }
}

/// How the code exchange reaches the identity provider.
///
/// Hosts supply their own transport (or use [`ReqwestClient`] with the
/// `reqwest-client` feature). A transport error means no response arrived;
/// any response, whatever its status, is returned as `Ok`.
pub trait HttpClient: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>>> + Send;
}

#[cfg(feature = "reqwest-client")]
mod reqwest_impl {
    use super::{HttpClient, HttpRequest, HttpResponse};
    use tracing::trace;

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestClient {
        inner: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Wrap a preconfigured client (timeouts, proxies, TLS roots).
        pub fn with_client(inner: reqwest::Client) -> Self {
            Self { inner }
        }
    }

    impl HttpClient for ReqwestClient {
        async fn send(
            &self,
            req: HttpRequest,
        ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
            let mut builder = self.inner.post(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }

            let response = builder.body(req.body).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            trace!(status, bytes = body.len(), "token endpoint replied");

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest-client")]
pub use reqwest_impl::ReqwestClient;
