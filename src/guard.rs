use serde::Deserialize;

/// Paths that require a signed-in user, and where to send everyone else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteGuard {
    #[serde(default)]
    pub protected_paths: Vec<String>,
    #[serde(default = "default_redirect")]
    pub redirect_to: String,
}

fn default_redirect() -> String {
    "/".into()
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            protected_paths: Vec::new(),
            redirect_to: default_redirect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

impl RouteGuard {
    pub fn new(protected_paths: &[&str]) -> Self {
        Self {
            protected_paths: protected_paths.iter().map(|p| p.to_string()).collect(),
            redirect_to: default_redirect(),
        }
    }

    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = redirect_to.into();
        self
    }

    /// Exact path match; query strings and fragments are not part of `path`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_paths.iter().any(|p| p == path)
    }

    pub fn check(&self, path: &str, logged_in: bool) -> RouteDecision {
        if self.is_protected(path) && !logged_in {
            RouteDecision::Redirect(self.redirect_to.clone())
        } else {
            RouteDecision::Allow
        }
    }
}
