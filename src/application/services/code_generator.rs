//! Random short code generation.

use crate::domain::ShortCode;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated short codes.
///
/// 62^4 gives roughly 14.7M combinations, plenty for a personal service while
/// keeping links easy to type.
pub const GENERATED_CODE_LENGTH: usize = 4;

/// Produces candidate short codes.
///
/// Generators don't touch storage; uniqueness is settled by the allocator
/// through the store's atomic insert.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> ShortCode;
}

/// Draws codes uniformly from `[A-Za-z0-9]` using the thread-local CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self {
            length: GENERATED_CODE_LENGTH,
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ShortCode {
        let raw: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();

        // Alphanumeric output is a subset of the short code alphabet.
        ShortCode::new_unchecked(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_correct_length() {
        let code = RandomCodeGenerator::new().generate();
        assert_eq!(code.as_str().len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_alphanumeric_only() {
        let generator = RandomCodeGenerator::new();

        for _ in 0..1000 {
            let code = generator.generate();
            assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_covers_all_character_classes() {
        let generator = RandomCodeGenerator::new();
        let chars: String = (0..2000)
            .map(|_| generator.generate().into_inner())
            .collect();

        assert!(chars.chars().any(|c| c.is_ascii_uppercase()));
        assert!(chars.chars().any(|c| c.is_ascii_lowercase()));
        assert!(chars.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_mostly_unique() {
        let generator = RandomCodeGenerator::new();
        let codes: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();

        // Birthday bound over 62^4 makes more than a handful of repeats
        // essentially impossible.
        assert!(codes.len() > 990);
    }
}
