//! Textbook RSA over per-character plaintext.
//!
//! Primes come from trial-division rejection sampling in a configurable range,
//! the private exponent from the iterative extended Euclidean algorithm, and
//! every character code is encrypted with one modular exponentiation. There is
//! no padding and no secure randomness; this demonstrates the trapdoor only.

pub mod rsa;
pub mod util;

pub use rsa::{decrypt, encrypt, generate_rsa_keys, RsaError, RsaPrivateKey, RsaPublicKey};
pub use util::KeyGenConfig;
