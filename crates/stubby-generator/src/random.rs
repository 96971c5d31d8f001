use crate::error::GeneratorError;
use crate::Generator;
use rand::Rng;
use stubby_core::Identifier;
use typed_builder::TypedBuilder;

/// Characters allowed in URL path segments without escaping.
pub const BASE62_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const DEFAULT_LENGTH: usize = 5;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters in every generated identifier.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    /// Characters to draw from. Must be non-empty ascii.
    #[builder(default = BASE62_ALPHABET.to_string(), setter(into))]
    pub alphabet: String,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws each character uniformly at random from an alphabet.
///
/// With the default settings (5 base62 characters) there are 62^5, roughly
/// 916 million, distinct identifiers.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
    alphabet: Vec<u8>,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        if settings.length == 0 {
            return Err(GeneratorError::ZeroLength);
        }
        if settings.alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        if let Some(c) = settings.alphabet.chars().find(|c| !c.is_ascii()) {
            return Err(GeneratorError::NonAsciiAlphabet(c));
        }

        Ok(Self {
            length: settings.length,
            alphabet: settings.alphabet.into_bytes(),
        })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            alphabet: BASE62_ALPHABET.as_bytes().to_vec(),
        }
    }
}

impl Generator for RandomGenerator {
    type Output = Identifier;

    fn generate(&self) -> Self::Output {
        // thread_rng is thread-local, so concurrent callers never share state.
        let mut rng = rand::thread_rng();
        let id: String = (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())] as char)
            .collect();
        Identifier::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn default_settings_produce_five_base62_chars() {
        let generator = RandomGenerator::default();

        for _ in 0..100 {
            let id = generator.generate();
            assert_eq!(id.as_str().len(), 5);
            assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn custom_alphabet_and_length() {
        let settings = RandomGeneratorSettings::builder()
            .length(8)
            .alphabet("ab")
            .build();
        let generator = RandomGenerator::new(settings).unwrap();

        let id = generator.generate();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn single_char_alphabet_is_deterministic() {
        let settings = RandomGeneratorSettings::builder()
            .length(3)
            .alphabet("x")
            .build();
        let generator = RandomGenerator::new(settings).unwrap();

        assert_eq!(generator.generate().as_str(), "xxx");
    }

    #[test]
    fn rejects_zero_length() {
        let settings = RandomGeneratorSettings::builder().length(0).build();
        assert_eq!(
            RandomGenerator::new(settings).unwrap_err(),
            GeneratorError::ZeroLength
        );
    }

    #[test]
    fn rejects_empty_alphabet() {
        let settings = RandomGeneratorSettings::builder().alphabet("").build();
        assert_eq!(
            RandomGenerator::new(settings).unwrap_err(),
            GeneratorError::EmptyAlphabet
        );
    }

    #[test]
    fn rejects_non_ascii_alphabet() {
        let settings = RandomGeneratorSettings::builder().alphabet("abç").build();
        assert_eq!(
            RandomGenerator::new(settings).unwrap_err(),
            GeneratorError::NonAsciiAlphabet('ç')
        );
    }

    #[test]
    fn collisions_are_rare() {
        let generator = RandomGenerator::default();
        let ids: HashSet<_> = (0..1_000).map(|_| generator.generate()).collect();
        // 1000 draws from ~916M values; a handful of collisions would already be suspicious.
        assert!(ids.len() >= 998);
    }

    #[test]
    fn concurrent_generation() {
        let generator = Arc::new(RandomGenerator::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..100).map(|_| generator.generate()).collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let ids = handle.join().unwrap();
            assert_eq!(ids.len(), 100);
            assert!(ids.iter().all(|id| id.as_str().len() == DEFAULT_LENGTH));
        }
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
