//! Opaque identifier generation.
//!
//! Short codes are sampled from a fixed 62-symbol alphanumeric alphabet;
//! refresh tokens are raw random bytes encoded as URL-safe base64. Both use
//! a cryptographically secure random source. Uniqueness is the caller's
//! responsibility.

use base64::Engine as _;
use rand::Rng;

/// The 62-symbol alphabet short codes are drawn from.
pub const CODE_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of random bytes in a refresh token before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates a uniformly random short code of `length` symbols.
///
/// The thread-local generator is a CSPRNG, so codes are not guessable or
/// enumerable by an attacker.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Generates an opaque refresh-token value.
///
/// 256 bits of entropy encoded as URL-safe base64 without padding (43
/// characters). Collisions are probabilistically impossible and are not
/// re-checked by callers.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_refresh_token() -> String {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(12).len(), 12);
    }

    #[test]
    fn test_generate_code_alphabet_membership() {
        let code = generate_code(64);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        let code = generate_code(32);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(6));
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_alphabet_has_62_symbols() {
        assert_eq!(CODE_ALPHABET.len(), 62);

        let unique: HashSet<u8> = CODE_ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_refresh_token_length_and_charset() {
        let token = generate_refresh_token();

        // 32 bytes -> 43 base64url characters, no padding
        assert_eq!(token.len(), 43);
        assert!(!token.contains('='));
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let mut tokens = HashSet::new();

        for _ in 0..1000 {
            tokens.insert(generate_refresh_token());
        }

        assert_eq!(tokens.len(), 1000);
    }
}
