// RSA Error Types
// Every failure a key generation or transform call can report

use thiserror::Error;

use super::bigint::RsaBigInt;

/// Errors raised by prime generation, key generation and the cipher transform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsaError {
    /// Sampling range bounds are inverted
    #[error("Invalid sampling range: start {start} is greater than end {end}")]
    InvalidRange { start: RsaBigInt, end: RsaBigInt },

    /// Every sampled candidate was composite
    #[error("No prime found in [{start}, {end}] after {attempts} attempts")]
    NoPrimeFound {
        start: RsaBigInt,
        end: RsaBigInt,
        attempts: u32,
    },

    /// No public exponent coprime to the totient was drawn
    #[error("No public exponent coprime to the totient found after {attempts} attempts")]
    ExponentSearchExhausted { attempts: u32 },

    /// The totient leaves no room for a public exponent in [1, φ)
    #[error("Totient {phi} is too small to pick a public exponent")]
    DegenerateTotient { phi: RsaBigInt },

    /// gcd(a, m) != 1, so a has no inverse modulo m
    #[error("{a} has no inverse modulo {m} (gcd is {gcd})")]
    NotInvertible {
        a: RsaBigInt,
        m: RsaBigInt,
        gcd: RsaBigInt,
    },

    /// A character code does not fit below the modulus
    #[error("Character {ch:?} (code {code}) does not fit below modulus {modulus}")]
    EncodingRange {
        ch: char,
        code: u32,
        modulus: RsaBigInt,
    },

    /// A ciphertext value lies outside [0, n)
    #[error("Ciphertext value at position {index} is not below modulus {modulus}")]
    CiphertextRange { index: usize, modulus: RsaBigInt },

    /// Decryption produced a number that is not a Unicode scalar value
    #[error("Decrypted value {value} is not a valid character code")]
    InvalidCodePoint { value: RsaBigInt },

    /// Key material cannot be used
    #[error("Invalid key: {message}")]
    InvalidKey { message: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for RSA operations
pub type RsaResult<T> = Result<T, RsaError>;
