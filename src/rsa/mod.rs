// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;

pub use bigint::{extended_gcd, gcd, is_prime, mod_inverse, mod_pow, RsaBigInt};
pub use decrypt::{decrypt, decrypt_code};
pub use encrypt::{encrypt, encrypt_code, Ciphertext};
pub use error::{RsaError, RsaResult};
pub use keygen::{
    generate_default_keys, generate_large_prime, generate_rsa_keys, keys_from_primes,
    RsaPrivateKey, RsaPublicKey,
};
