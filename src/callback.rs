use tracing::{debug, error, warn};

use crate::config::AuthConfig;
use crate::error::Error;
use crate::http::HttpClient;
use crate::location::{Location, authorization_code, without_code};
use crate::request::exchange_code;
use crate::store::{SessionStore, Storage};

/// Steps of the post-redirect callback.
///
/// `Idle` is terminal when the URL has no `code`. Every other path ends in
/// `UrlCleaned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackState {
    Idle,
    CodePresent,
    Exchanging,
    TokensPersisted,
    ExchangeFailed,
    UrlCleaned,
}

/// What the callback did. Recoverable errors end up in `warning` instead of
/// being returned.
#[derive(Debug)]
pub struct CallbackOutcome {
    states: Vec<CallbackState>,
    warning: Option<Error>,
}

impl CallbackOutcome {
    fn idle() -> Self {
        Self {
            states: vec![CallbackState::Idle],
            warning: None,
        }
    }

    /// States visited, in order.
    pub fn states(&self) -> &[CallbackState] {
        &self.states
    }

    pub fn final_state(&self) -> CallbackState {
        self.states.last().copied().unwrap_or(CallbackState::Idle)
    }

    pub fn is_idle(&self) -> bool {
        self.states == [CallbackState::Idle]
    }

    pub fn is_authenticated(&self) -> bool {
        self.states.contains(&CallbackState::TokensPersisted)
    }

    pub fn warning(&self) -> Option<&Error> {
        self.warning.as_ref()
    }

    pub fn into_warning(self) -> Option<Error> {
        self.warning
    }
}

/// Removes `code` from the visible URL when dropped, so cleanup also runs if
/// the exchange panics or its future is dropped mid-flight.
struct CodeScrubber<'a, L: Location + ?Sized> {
    location: &'a L,
}

impl<L: Location + ?Sized> Drop for CodeScrubber<'_, L> {
    fn drop(&mut self) {
        let current = self.location.href();
        self.location.replace(&without_code(&current));
        debug!(state = ?CallbackState::UrlCleaned, "authorization code removed from URL");
    }
}

/// Complete the login if the current URL carries an authorization code.
///
/// Never fails: missing verifiers, HTTP errors and malformed responses are
/// logged at warn level and reported in the outcome. The user stays
/// unauthenticated and the code is always scrubbed from the URL.
pub async fn handle_callback<S, L, H>(
    config: &AuthConfig,
    store: &SessionStore<S>,
    location: &L,
    http: &H,
) -> CallbackOutcome
where
    S: Storage,
    L: Location + ?Sized,
    H: HttpClient + ?Sized,
{
    let Some(code) = authorization_code(&location.href()) else {
        debug!(state = ?CallbackState::Idle, "no authorization code in URL");
        return CallbackOutcome::idle();
    };

    let mut states = vec![CallbackState::CodePresent];
    debug!(state = ?CallbackState::CodePresent, "authorization code found");

    let scrubber = CodeScrubber { location };
    let result = redeem(config, store, http, &code, &mut states).await;
    drop(scrubber);
    states.push(CallbackState::UrlCleaned);

    let warning = match result {
        Ok(()) => None,
        Err(err @ Error::Http(_)) => {
            error!(error = %err, "authorization code exchange failed");
            Some(err)
        }
        Err(err) => {
            warn!(error = %err, "authorization code not redeemed");
            Some(err)
        }
    };

    CallbackOutcome { states, warning }
}

async fn redeem<S, H>(
    config: &AuthConfig,
    store: &SessionStore<S>,
    http: &H,
    code: &str,
    states: &mut Vec<CallbackState>,
) -> Result<(), Error>
where
    S: Storage,
    H: HttpClient + ?Sized,
{
    let verifier = store.verifier();
    let redirect_uri = store
        .redirect_uri()
        .unwrap_or_else(|| config.redirect_uri.clone());

    // A code is redeemed at most once: the verifier goes before the request.
    store.clear_pkce();

    let verifier = verifier.ok_or(Error::MissingVerifier)?;

    states.push(CallbackState::Exchanging);
    debug!(
        state = ?CallbackState::Exchanging,
        endpoint = %config.token_endpoint(),
        "exchanging authorization code"
    );

    match exchange_code(http, config, code, &verifier, &redirect_uri).await {
        Ok(tokens) => {
            store.set_tokens(&tokens);
            states.push(CallbackState::TokensPersisted);
            debug!(
                state = ?CallbackState::TokensPersisted,
                refresh_token = tokens.refresh_token.is_some(),
                "tokens stored"
            );
            Ok(())
        }
        Err(err) => {
            states.push(CallbackState::ExchangeFailed);
            debug!(state = ?CallbackState::ExchangeFailed, "no tokens stored");
            Err(err)
        }
    }
}
