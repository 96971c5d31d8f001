//! Redirect and click-stats service.
//!
//! [`RedirectorService`] resolves identifiers for the redirect path and
//! hands one click event per successful lookup to a [`ClickAggregator`].
//! The aggregator is a single consumer task draining a bounded queue, so
//! counting clicks never happens on the redirect's critical path and bursts
//! for the same identifier are applied one at a time in arrival order.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stubby_core::Repository;
//! use stubby_generator::SeqGenerator;
//! use stubby_redirector::{AggregatorSettings, ClickAggregator, Redirector, RedirectorService};
//! use stubby_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Arc::new(InMemoryRepository::new(SeqGenerator::with_prefix("s")));
//! let (clicks, aggregator) =
//!     ClickAggregator::spawn(Arc::clone(&repository), AggregatorSettings::default());
//! let service = RedirectorService::new(Arc::clone(&repository), clicks);
//!
//! let created = repository.create_or_fetch("https://example.com").await?;
//! if let Some(record) = service.resolve(created.record.id.as_str()).await? {
//!     println!("Redirect to: {}", record.destination);
//! }
//!
//! drop(service);
//! let report = aggregator.shutdown().await?;
//! assert_eq!(report.applied, 1);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod error;
pub mod redirector;
pub mod service;

pub use aggregator::{
    AggregatorReport, AggregatorSettings, ClickAggregator, ClickEvent, ClickSender,
};
pub use error::{RedirectorError, Result};
pub use redirector::Redirector;
pub use service::RedirectorService;
