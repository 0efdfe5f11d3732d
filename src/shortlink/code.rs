//! Short code generation.

use rand::Rng;

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Number of codes drawn before allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 10;

/// Characters a short code is drawn from, uniformly.
const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Source of candidate short codes.
pub trait CodeGenerator: Send + Sync {
    /// Draw one candidate code.
    fn generate(&self) -> String;
}

/// Fixed-length codes drawn from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Create a generator producing codes of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Length of generated codes.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..CODE_CHARS.len());
                CODE_CHARS[idx] as char
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_length() {
        assert_eq!(RandomCodeGenerator::new(16).generate().len(), 16);
        assert_eq!(RandomCodeGenerator::default().generate().len(), DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_code_alphabet() {
        let code = RandomCodeGenerator::new(64).generate();
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_are_distinct() {
        let generator = RandomCodeGenerator::default();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 1000);
    }
}
