use crate::Result;
use async_trait::async_trait;
use stubby_core::{ClickStats, UrlRecord};

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves an identifier to its stored record and counts one click.
    /// Returns `None` if the identifier does not exist; no click is counted then.
    async fn resolve(&self, id: &str) -> Result<Option<UrlRecord>>;

    /// Reads the click count for an identifier.
    /// Returns `None` if the identifier does not exist.
    async fn stats(&self, id: &str) -> Result<Option<ClickStats>>;
}
