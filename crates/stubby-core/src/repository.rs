use crate::error::Result;
use crate::identifier::Identifier;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A shortened URL as stored in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The short identifier. Never reassigned once created.
    pub id: Identifier,
    /// The original URL that was shortened.
    pub destination: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// Number of redirects applied to this record so far.
    pub clicks: u64,
}

/// A snapshot of the click counter of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickStats {
    pub clicks: u64,
}

/// Outcome of [`Repository::create_or_fetch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub record: UrlRecord,
    /// `false` when an existing record for the same destination was returned.
    pub is_new: bool,
}

/// A read-only view of a repository.
///
/// The redirect and stats paths only ever need these operations.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given identifier.
    /// Returns `None` if the identifier does not exist.
    async fn lookup(&self, id: &str) -> Result<Option<UrlRecord>>;

    /// Reads the current click count for a given identifier.
    /// Returns `None` if the identifier does not exist.
    async fn stats(&self, id: &str) -> Result<Option<ClickStats>>;

    /// Number of records currently stored.
    async fn len(&self) -> Result<usize>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Returns the record for `destination`, creating it on first use.
    ///
    /// Fails with `InvalidInput` on an empty destination and with
    /// `GenerationExhausted` when no free identifier could be found.
    async fn create_or_fetch(&self, destination: &str) -> Result<Created>;

    /// Adds one click to the record identified by `id`.
    /// Returns `Err(NotFound)` if the identifier does not exist.
    async fn record_click(&self, id: &str) -> Result<()>;
}
