use std::collections::HashMap;

use parking_lot::Mutex;

use crate::tokens::TokenSet;

/// Key-value storage that survives the round trip to the identity provider.
///
/// Implementations should be scoped to the browser session (tokens are
/// bearer credentials). Methods take `&self`; implementations handle their
/// own synchronization.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process [`Storage`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

pub const VERIFIER_KEY: &str = "pkce_verifier";
pub const REDIRECT_URI_KEY: &str = "redirect_uri";
pub const ID_TOKEN_KEY: &str = "id_token";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Typed accessors for the PKCE and token entries of a [`Storage`].
pub struct SessionStore<S> {
    storage: S,
    prefix: String,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_prefix(storage, "")
    }

    pub fn with_prefix(storage: S, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    fn get(&self, name: &str) -> Option<String> {
        self.storage.get(&self.key(name))
    }

    pub fn set_verifier(&self, verifier: &str) {
        self.storage.set(&self.key(VERIFIER_KEY), verifier);
    }

    pub fn verifier(&self) -> Option<String> {
        self.get(VERIFIER_KEY)
    }

    pub fn set_redirect_uri(&self, redirect_uri: &str) {
        self.storage.set(&self.key(REDIRECT_URI_KEY), redirect_uri);
    }

    pub fn redirect_uri(&self) -> Option<String> {
        self.get(REDIRECT_URI_KEY)
    }

    /// Drop the verifier and redirect URI once a code has been processed.
    pub fn clear_pkce(&self) {
        self.storage.remove(&self.key(VERIFIER_KEY));
        self.storage.remove(&self.key(REDIRECT_URI_KEY));
    }

    /// Store every token in the set. A set without a refresh token removes
    /// any stale one left from an earlier session.
    pub fn set_tokens(&self, tokens: &TokenSet) {
        self.storage.set(&self.key(ID_TOKEN_KEY), &tokens.id_token);
        self.storage
            .set(&self.key(ACCESS_TOKEN_KEY), &tokens.access_token);
        match tokens.refresh_token {
            Some(ref refresh) => self.storage.set(&self.key(REFRESH_TOKEN_KEY), refresh),
            None => self.storage.remove(&self.key(REFRESH_TOKEN_KEY)),
        }
    }

    pub fn id_token(&self) -> Option<String> {
        self.get(ID_TOKEN_KEY)
    }

    pub fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    /// Remove all three token entries. This is the only logout mechanism.
    pub fn clear_tokens(&self) {
        self.storage.remove(&self.key(ID_TOKEN_KEY));
        self.storage.remove(&self.key(ACCESS_TOKEN_KEY));
        self.storage.remove(&self.key(REFRESH_TOKEN_KEY));
    }
}
