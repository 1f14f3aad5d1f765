use serde::Deserialize;
use url::Url;

use crate::error::Error;
use crate::guard::RouteGuard;
use crate::pkce::{DEFAULT_VERIFIER_LENGTH, MAX_VERIFIER_LENGTH, MIN_VERIFIER_LENGTH};

/// Client configuration for a hosted identity provider.
///
/// Endpoints are derived from `base_url`:
/// `{base_url}/oauth2/authorize`, `{base_url}/oauth2/token` and
/// `{base_url}/logout`.
///
/// # Example
///
/// ```rust
/// use hosted_pkce::AuthConfig;
///
/// let config = AuthConfig::cognito(
///     "myapp",
///     "us-east-1",
///     "client-id",
///     "https://example.com/",
/// )
/// .with_scopes(&["openid", "email"]);
///
/// assert_eq!(
///     config.token_endpoint(),
///     "https://myapp.auth.us-east-1.amazoncognito.com/oauth2/token"
/// );
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub client_id: String,
    pub base_url: String,
    pub redirect_uri: String,
    /// Where the provider sends the browser after logout.
    /// Defaults to `redirect_uri`.
    #[serde(default)]
    pub logout_uri: Option<String>,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    #[serde(default = "default_verifier_length")]
    pub verifier_length: usize,
    /// Prepended to every storage key.
    #[serde(default)]
    pub storage_prefix: String,
    /// Label shown for a signed-in user whose token has no email claim.
    #[serde(default = "default_account_label")]
    pub fallback_account_label: String,
    #[serde(default)]
    pub guard: RouteGuard,
}

fn default_scopes() -> Vec<String> {
    vec!["openid".into(), "email".into(), "phone".into()]
}

fn default_verifier_length() -> usize {
    DEFAULT_VERIFIER_LENGTH
}

fn default_account_label() -> String {
    "My account".into()
}

impl AuthConfig {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            redirect_uri: redirect_uri.into(),
            logout_uri: None,
            scopes: default_scopes(),
            verifier_length: DEFAULT_VERIFIER_LENGTH,
            storage_prefix: String::new(),
            fallback_account_label: default_account_label(),
            guard: RouteGuard::default(),
        }
    }

    /// Configuration for an Amazon Cognito hosted UI domain
    /// (`https://{domain_prefix}.auth.{region}.amazoncognito.com`).
    pub fn cognito(
        domain_prefix: &str,
        region: &str,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self::new(
            format!("https://{domain_prefix}.auth.{region}.amazoncognito.com"),
            client_id,
            redirect_uri,
        )
    }

    /// Parse and validate a TOML document.
    ///
    /// ```toml
    /// client_id = "abc"
    /// base_url = "https://login.example.com"
    /// redirect_uri = "https://example.com/"
    /// scopes = ["openid", "email"]
    ///
    /// [guard]
    /// protected_paths = ["/private.html"]
    /// ```
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let mut config: AuthConfig = toml::from_str(source)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn with_scopes(mut self, scopes: &[&str]) -> Self {
        self.scopes = scopes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_logout_uri(mut self, logout_uri: impl Into<String>) -> Self {
        self.logout_uri = Some(logout_uri.into());
        self
    }

    pub fn with_verifier_length(mut self, length: usize) -> Self {
        self.verifier_length = length;
        self
    }

    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub fn with_fallback_account_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_account_label = label.into();
        self
    }

    pub fn with_guard(mut self, guard: RouteGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Check that every URL parses and the verifier length is allowed.
    pub fn validate(&self) -> Result<(), Error> {
        if self.client_id.is_empty() {
            return Err(Error::Config("client_id must not be empty".into()));
        }
        if !(MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH).contains(&self.verifier_length) {
            return Err(Error::InvalidVerifierLength {
                length: self.verifier_length,
            });
        }
        Url::parse(&self.base_url)?;
        Url::parse(&self.redirect_uri)?;
        Url::parse(self.logout_uri())?;
        Ok(())
    }

    pub fn authorization_endpoint(&self) -> String {
        format!("{}/oauth2/authorize", self.base_url)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.base_url)
    }

    pub fn logout_endpoint(&self) -> String {
        format!("{}/logout", self.base_url)
    }

    pub fn logout_uri(&self) -> &str {
        self.logout_uri.as_deref().unwrap_or(&self.redirect_uri)
    }
}
