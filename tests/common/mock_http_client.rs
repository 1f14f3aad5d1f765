use hosted_pkce::{HttpClient, HttpRequest, HttpResponse};
use std::sync::Mutex;

/// An `HttpClient` that records requests and returns pre-configured
/// responses (or transport failures) in FIFO order.
pub struct MockHttpClient {
    responses: Mutex<Vec<Result<HttpResponse, String>>>,
    recorded: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn enqueue_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push(Ok(response));
    }

    pub fn enqueue_json(&self, status: u16, body: serde_json::Value) {
        self.enqueue_response(HttpResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        });
    }

    /// Make the next request fail before any response arrives.
    pub fn enqueue_transport_error(&self, message: &str) {
        self.responses.lock().unwrap().push(Err(message.to_string()));
    }

    /// Drain and return all recorded requests.
    pub fn take_requests(&self) -> Vec<HttpRequest> {
        self.recorded.lock().unwrap().drain(..).collect()
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }
}

impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.recorded.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().remove(0);
        next.map_err(Into::into)
    }
}

pub fn parse_form_body(request: &HttpRequest) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
