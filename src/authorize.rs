use url::Url;

use crate::config::AuthConfig;
use crate::error::Error;

/// Build the provider's authorize URL for an S256 PKCE request.
///
/// The caller must persist the verifier behind `challenge` and the exact
/// `redirect_uri` before navigating, so the callback can recover them.
pub fn build_authorize_url(
    config: &AuthConfig,
    challenge: &str,
    redirect_uri: &str,
) -> Result<Url, Error> {
    let mut url = Url::parse(&config.authorization_endpoint())?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "code")
        .append_pair("scope", &config.scopes.join(" "))
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("code_challenge_method", "S256")
        .append_pair("code_challenge", challenge);

    Ok(url)
}

/// Build the provider's logout URL.
pub fn build_logout_url(config: &AuthConfig) -> Result<Url, Error> {
    let mut url = Url::parse(&config.logout_endpoint())?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("logout_uri", config.logout_uri());

    Ok(url)
}
