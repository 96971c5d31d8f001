use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("identifier not found: {0}")]
    NotFound(String),
    #[error("identifier generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            RepositoryError::NotFound("abc".into()).to_string(),
            "identifier not found: abc"
        );
        assert_eq!(
            RepositoryError::GenerationExhausted { attempts: 16 }.to_string(),
            "identifier generation exhausted after 16 attempts"
        );
    }
}
