use crate::Error;

/// Tokens returned by a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl TokenSet {
    /// Pick the recognized fields out of a token endpoint response.
    ///
    /// `id_token` and `access_token` must be non-empty strings. A
    /// `refresh_token` that is absent, empty or not a string is ignored.
    pub fn from_response(data: &serde_json::Value) -> Result<Self, Error> {
        Ok(Self {
            id_token: required(data, "id_token")?,
            access_token: required(data, "access_token")?,
            refresh_token: data["refresh_token"]
                .as_str()
                .filter(|s| !s.is_empty())
                .map(String::from),
        })
    }
}

fn required(data: &serde_json::Value, field: &'static str) -> Result<String, Error> {
    data[field]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or(Error::ExchangeMalformedResponse { field })
}
