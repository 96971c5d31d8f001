use stubby_core::RepositoryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Clone, Error)]
pub enum RedirectorError {
    #[error("repository operation failed: {0}")]
    Repository(
        #[from]
        #[source]
        RepositoryError,
    ),
    #[error("click queue is closed")]
    QueueClosed,
    #[error("click aggregator stopped unexpectedly: {0}")]
    AggregatorFailed(String),
}
