use tracing::{debug, info};
use url::Url;

use crate::authorize::{build_authorize_url, build_logout_url};
use crate::callback::{CallbackOutcome, handle_callback};
use crate::config::AuthConfig;
use crate::error::Error;
use crate::guard::RouteDecision;
use crate::http::HttpClient;
use crate::location::Location;
use crate::oidc::{Claims, account_label, decode_id_token};
use crate::pkce::{derive_challenge, generate_verifier};
use crate::store::{SessionStore, Storage};

/// Login state for one site: configuration plus the injected session
/// storage and page location.
///
/// # Example
///
/// ```rust
/// use hosted_pkce::{AuthConfig, HostedAuth, MemoryLocation, MemoryStorage};
///
/// # fn example() -> Result<(), hosted_pkce::Error> {
/// let config = AuthConfig::new("https://login.example.com", "client-id", "https://example.com/");
/// let location = MemoryLocation::parse("https://example.com/").unwrap();
/// let auth = HostedAuth::new(config, MemoryStorage::new(), location)?;
///
/// // Before the redirect: verifier stored, browser sent to the provider.
/// let url = auth.login()?;
/// assert!(url.as_str().starts_with("https://login.example.com/oauth2/authorize?"));
/// assert!(!auth.is_logged_in());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct HostedAuth<S, L> {
    config: AuthConfig,
    store: SessionStore<S>,
    location: L,
}

impl<S: Storage, L: Location> HostedAuth<S, L> {
    /// Validates `config` and namespaces storage keys with its prefix.
    pub fn new(config: AuthConfig, storage: S, location: L) -> Result<Self, Error> {
        config.validate()?;
        let store = SessionStore::with_prefix(storage, config.storage_prefix.clone());
        Ok(Self {
            config,
            store,
            location,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Start a login: generate and store a verifier and the redirect URI,
    /// then navigate to the provider. Returns the authorize URL.
    ///
    /// Fails only if the secure random source is unavailable.
    pub fn login(&self) -> Result<Url, Error> {
        let verifier = generate_verifier(self.config.verifier_length)?;
        let challenge = derive_challenge(&verifier);
        let redirect_uri = &self.config.redirect_uri;

        let url = build_authorize_url(&self.config, &challenge, redirect_uri)?;

        self.store.set_verifier(&verifier);
        self.store.set_redirect_uri(redirect_uri);

        info!(
            endpoint = %self.config.authorization_endpoint(),
            "redirecting to identity provider"
        );
        self.location.assign(&url);
        Ok(url)
    }

    /// Redeem an authorization code in the current URL, if there is one.
    /// See [`handle_callback`](crate::handle_callback).
    pub async fn handle_callback<H: HttpClient + ?Sized>(&self, http: &H) -> CallbackOutcome {
        handle_callback(&self.config, &self.store, &self.location, http).await
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.id_token().is_some()
    }

    /// Unverified claims of the stored identity token.
    pub fn identity_claims(&self) -> Option<Claims> {
        let token = self.store.id_token()?;
        match decode_id_token(&token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                debug!(error = %err, "stored identity token is not decodable");
                None
            }
        }
    }

    /// Name for the account menu: the email's local part, the configured
    /// fallback label when signed in without an email, `None` when signed out.
    pub fn account_label(&self) -> Option<String> {
        if !self.is_logged_in() {
            return None;
        }
        let label = self
            .identity_claims()
            .as_ref()
            .and_then(|claims| account_label(claims).map(String::from));
        Some(label.unwrap_or_else(|| self.config.fallback_account_label.clone()))
    }

    /// Clear all tokens, then navigate to the provider's logout endpoint.
    /// Tokens are gone before navigation starts, even if the URL fails to build.
    pub fn logout(&self) -> Result<Url, Error> {
        self.store.clear_tokens();
        info!("tokens cleared");

        let url = build_logout_url(&self.config)?;
        self.location.assign(&url);
        Ok(url)
    }

    /// Redirect away from a protected path when signed out.
    pub fn enforce_route_guard(&self) -> RouteDecision {
        let current = self.location.href();
        let decision = self.config.guard.check(current.path(), self.is_logged_in());

        if let RouteDecision::Redirect(ref target) = decision {
            match current.join(target) {
                Ok(url) => {
                    debug!(path = current.path(), target = %url, "protected route, redirecting");
                    self.location.assign(&url);
                }
                Err(err) => debug!(error = %err, target = %target, "invalid guard redirect"),
            }
        }

        decision
    }
}
