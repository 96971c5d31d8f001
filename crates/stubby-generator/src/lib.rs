pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomGeneratorSettings};
pub use seq::SeqGenerator;

use stubby_core::Identifier;

/// Trait for generating candidate identifiers.
///
/// Implementations are pure generators that don't interact with storage.
/// The repository checks every candidate against its index and asks for
/// another one on collision, so a generator only has to make collisions
/// unlikely, not impossible.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<Identifier>;

    /// Produces a fresh candidate identifier. Callable concurrently through `&self`.
    fn generate(&self) -> Self::Output;
}
