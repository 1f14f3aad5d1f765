use parking_lot::Mutex;
use url::Url;

/// The page's current address and the two ways of changing it.
pub trait Location: Send + Sync {
    /// The full current URL.
    fn href(&self) -> Url;

    /// Replace the visible URL without navigating (history replace).
    fn replace(&self, url: &Url);

    /// Navigate to `url`.
    fn assign(&self, url: &Url);
}

impl<T: Location + ?Sized> Location for &T {
    fn href(&self) -> Url {
        (**self).href()
    }

    fn replace(&self, url: &Url) {
        (**self).replace(url)
    }

    fn assign(&self, url: &Url) {
        (**self).assign(url)
    }
}

/// Read the `code` query parameter, if any. An empty `code=` counts as
/// absent.
pub fn authorization_code(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Copy of `url` with every `code` parameter removed. Other parameters keep
/// their order; an emptied query is dropped entirely.
pub fn without_code(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "code")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(&kept);
    }
    cleaned
}

/// In-process [`Location`] that records navigations instead of performing
/// them.
#[derive(Debug)]
pub struct MemoryLocation {
    current: Mutex<Url>,
    replaced: Mutex<Vec<Url>>,
    navigations: Mutex<Vec<Url>>,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self {
            current: Mutex::new(url),
            replaced: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Every URL passed to [`Location::replace`], oldest first.
    pub fn replacements(&self) -> Vec<Url> {
        self.replaced.lock().clone()
    }

    /// Every URL passed to [`Location::assign`], oldest first.
    pub fn navigations(&self) -> Vec<Url> {
        self.navigations.lock().clone()
    }

    /// Simulate the browser arriving at `url` (e.g. back from the provider).
    pub fn arrive(&self, url: Url) {
        *self.current.lock() = url;
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> Url {
        self.current.lock().clone()
    }

    fn replace(&self, url: &Url) {
        *self.current.lock() = url.clone();
        self.replaced.lock().push(url.clone());
    }

    fn assign(&self, url: &Url) {
        *self.current.lock() = url.clone();
        self.navigations.lock().push(url.clone());
    }
}
