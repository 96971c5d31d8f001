use std::sync::Arc;

use stubby_core::{Identifier, Repository};
use stubby_redirector::Redirector;

#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn Repository>,
    redirector: Arc<dyn Redirector>,
    base_url: String,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn Repository>,
        redirector: Arc<dyn Redirector>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            redirector,
            base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    pub fn redirector(&self) -> &dyn Redirector {
        self.redirector.as_ref()
    }

    /// Public redirect URL for `id`, e.g. `http://localhost:8888/r/abc12`.
    pub fn short_url(&self, id: &Identifier) -> String {
        id.to_url(&format!("{}/r", self.base_url))
    }

    pub fn stats_url(&self, id: &Identifier) -> String {
        id.to_url(&format!("{}/api/stats", self.base_url))
    }
}
