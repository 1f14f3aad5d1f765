//! Authorization Code + PKCE login against a hosted identity provider.
//!
//! The flow spans two page loads. [`HostedAuth::login`] stores a verifier
//! and sends the browser to the provider; after the redirect back,
//! [`HostedAuth::handle_callback`] exchanges the `code` for tokens and
//! scrubs it from the URL. Storage, location and HTTP transport are
//! injected, so the whole flow runs without a browser.

mod auth;
mod authorize;
mod callback;
mod config;
mod error;
mod guard;
mod http;
mod location;
mod oidc;
mod pkce;
mod request;
mod store;
mod tokens;

// Core
pub use auth::HostedAuth;
pub use callback::{CallbackOutcome, CallbackState, handle_callback};
pub use config::AuthConfig;
pub use error::Error;
pub use guard::{RouteDecision, RouteGuard};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use location::{Location, MemoryLocation};
pub use store::{MemoryStorage, SessionStore, Storage};
pub use tokens::TokenSet;

// Building blocks
pub use authorize::{build_authorize_url, build_logout_url};
pub use location::{authorization_code, without_code};
pub use oidc::{Claims, account_label, decode_id_token};
pub use pkce::{
    DEFAULT_VERIFIER_LENGTH, MAX_VERIFIER_LENGTH, MIN_VERIFIER_LENGTH, derive_challenge,
    generate_verifier,
};
pub use request::{create_code_exchange_request, exchange_code};

// Default HTTP client (behind feature flag)
#[cfg(feature = "reqwest-client")]
pub use http::ReqwestClient;
