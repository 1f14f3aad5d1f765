#![allow(dead_code)]

pub mod mock_http_client;
pub mod mock_server;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Install a test-writer subscriber once per test binary.
/// Honors `RUST_LOG`, e.g. `RUST_LOG=hosted_pkce=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Unsigned JWT carrying `claims` as its payload.
pub fn make_id_token(claims: &serde_json::Value) -> String {
    format!(
        "{}.{}.fake-signature",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes())
    )
}
