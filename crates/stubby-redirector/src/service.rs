use std::sync::Arc;

use crate::aggregator::ClickSender;
use crate::redirector::Redirector;
use async_trait::async_trait;
use stubby_core::{ClickStats, ReadRepository, UrlRecord};
use tracing::{debug, trace, warn};

/// Service for handling redirects and stats queries.
///
/// Uses a read-only repository to fetch records; click counting is handed
/// to the aggregator behind `clicks`.
#[derive(Debug)]
pub struct RedirectorService<R: ?Sized> {
    repository: Arc<R>,
    clicks: ClickSender,
}

impl<R: ReadRepository + ?Sized> RedirectorService<R> {
    /// Creates a new RedirectorService with the given repository and click queue.
    pub fn new(repository: Arc<R>, clicks: ClickSender) -> Self {
        Self { repository, clicks }
    }
}

impl<R: ?Sized> Clone for RedirectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clicks: self.clicks.clone(),
        }
    }
}

#[async_trait]
impl<R: ReadRepository + ?Sized> Redirector for RedirectorService<R> {
    async fn resolve(&self, id: &str) -> crate::Result<Option<UrlRecord>> {
        trace!(id, "resolving identifier");

        match self.repository.lookup(id).await? {
            Some(record) => {
                debug!(id, destination = %record.destination, "resolved identifier");
                if let Err(err) = self.clicks.send(record.id.as_str()).await {
                    warn!(id, error = %err, "click not recorded");
                }
                Ok(Some(record))
            }
            None => {
                trace!(id, "identifier not found");
                Ok(None)
            }
        }
    }

    async fn stats(&self, id: &str) -> crate::Result<Option<ClickStats>> {
        Ok(self.repository.stats(id).await?)
    }
}
