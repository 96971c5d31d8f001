use thiserror::Error;

/// Errors returned when a generator is built with unusable settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("identifier length must be at least 1")]
    ZeroLength,
    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,
    #[error("alphabet must be ascii, found {0:?}")]
    NonAsciiAlphabet(char),
}
