//! Core types and traits for the Stubby URL shortener.
//!
//! This crate provides the types shared by the identifier generators,
//! the in-memory repository and the redirect/stats service.

pub mod error;
pub mod identifier;
pub mod repository;

pub use error::{RepositoryError, Result};
pub use identifier::Identifier;
pub use repository::{ClickStats, Created, ReadRepository, Repository, UrlRecord};
