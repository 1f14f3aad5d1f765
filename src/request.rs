use crate::Error;
use crate::config::AuthConfig;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::tokens::TokenSet;

/// Build a form-encoded POST request.
/// Sets Content-Type, Accept: application/json, User-Agent: hosted-pkce.
pub fn create_form_request(endpoint: &str, body: &[(&str, &str)]) -> HttpRequest {
    let encoded_body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(body)
        .finish();

    HttpRequest {
        url: endpoint.to_string(),
        headers: vec![
            (
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "hosted-pkce".to_string()),
        ],
        body: encoded_body.into_bytes(),
    }
}

/// Build the authorization_code grant request for a public client.
pub fn create_code_exchange_request(
    config: &AuthConfig,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> HttpRequest {
    create_form_request(
        &config.token_endpoint(),
        &[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code_verifier", verifier),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ],
    )
}

/// Send the code exchange and interpret the response.
/// - transport failure -> Err(Error::Http(..))
/// - non-2xx -> Err(Error::ExchangeHttp { .. })
/// - 2xx without usable id/access tokens -> Err(Error::ExchangeMalformedResponse { .. })
pub async fn exchange_code(
    client: &(impl HttpClient + ?Sized),
    config: &AuthConfig,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> Result<TokenSet, Error> {
    let request = create_code_exchange_request(config, code, verifier, redirect_uri);
    let response = client.send(request).await?;
    interpret_token_response(&response)
}

pub fn interpret_token_response(response: &HttpResponse) -> Result<TokenSet, Error> {
    if !response.is_success() {
        return Err(Error::ExchangeHttp {
            status: response.status,
            code: response.error_code(),
        });
    }

    let json = response
        .json()
        .ok_or(Error::ExchangeMalformedResponse { field: "body" })?;
    TokenSet::from_response(&json)
}
