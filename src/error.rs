#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operating system's secure random source failed. Login cannot
    /// proceed; there is no fallback to a weaker generator.
    #[error("secure random source unavailable: {0}")]
    SecureRandomUnavailable(String),

    /// Verifier length outside the 43..=128 range allowed by RFC 7636.
    #[error("invalid PKCE verifier length: {length} (expected 43..=128)")]
    InvalidVerifierLength { length: usize },

    /// A code arrived but no verifier was stored before the redirect.
    #[error("no PKCE verifier in session storage")]
    MissingVerifier,

    /// Token endpoint answered with a non-success status.
    /// `code` carries the OAuth2 `error` field when the body had one.
    #[error("token exchange failed with HTTP {status}")]
    ExchangeHttp { status: u16, code: Option<String> },

    /// Token endpoint answered 2xx but a required field is missing or empty.
    #[error("token response missing or invalid field: {field}")]
    ExchangeMalformedResponse { field: &'static str },

    /// Network / transport error from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The identity token is not a decodable JWT.
    #[error("identity token could not be decoded")]
    InvalidIdToken,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the flow can continue (unauthenticated) after this error.
    /// Recoverable errors are absorbed by the callback handler.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingVerifier
                | Error::ExchangeHttp { .. }
                | Error::ExchangeMalformedResponse { .. }
                | Error::Http(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
