//! forge::mock
//!
//! Mock page source for deterministic testing.
//!
//! # Design
//!
//! Pages are registered by exact URL. Requests for unregistered URLs fail with
//! `ForgeError::NotFound`, which keeps tests honest about the URLs the engine
//! builds. Every request is recorded for later verification.
//!
//! # Example
//!
//! ```
//! use quarterlog::forge::mock::MockForge;
//! use quarterlog::forge::{Page, PageSource};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new().with_page("https://api.test/pulls", Page::new("[]", None));
//!
//! let page = forge.get_page("https://api.test/pulls").await.unwrap();
//! assert_eq!(page.body, b"[]");
//! assert_eq!(forge.requests(), vec!["https://api.test/pulls"]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{ForgeError, Page, PageSource};

/// Mock page source for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    /// Registered pages by URL.
    pages: HashMap<String, Page>,
    /// URLs that fail with the given error.
    failures: HashMap<String, ForgeError>,
    /// Recorded request URLs, in order.
    requests: Vec<String>,
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page for `url`.
    pub fn with_page(self, url: impl Into<String>, page: Page) -> Self {
        self.lock().pages.insert(url.into(), page);
        self
    }

    /// Register a JSON body for `url` with no `Link` header.
    pub fn with_json(self, url: impl Into<String>, json: serde_json::Value) -> Self {
        let body = json.to_string();
        self.with_page(url, Page::new(body, None))
    }

    /// Make requests for `url` fail with `error`.
    pub fn fail_on(self, url: impl Into<String>, error: ForgeError) -> Self {
        self.lock().failures.insert(url.into(), error);
        self
    }

    /// All request URLs seen so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Number of requests made for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.lock().requests.iter().filter(|u| *u == url).count()
    }

    fn lock(&self) -> MutexGuard<'_, MockForgeInner> {
        // A poisoned lock only happens after a test already panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PageSource for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_page(&self, url: &str) -> Result<Page, ForgeError> {
        let mut inner = self.lock();
        inner.requests.push(url.to_string());

        if let Some(error) = inner.failures.get(url) {
            return Err(error.clone());
        }

        inner
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(url.to_string()))
    }
}
