pub mod memory;

pub use memory::{InMemoryRepository, RepositorySettings};
pub use stubby_core::{ReadRepository, Repository, RepositoryError};
