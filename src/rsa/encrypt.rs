// RSA Encryption Implementation
// Textbook RSA applied to one character code at a time, no padding

use super::bigint::{from_u64, mod_pow, RsaBigInt};
use super::error::{RsaError, RsaResult};
use super::keygen::RsaPublicKey;

/// Ordered ciphertext, one value in `[0, n)` per plaintext character
pub type Ciphertext = Vec<RsaBigInt>;

/// Encrypt a single integer: code^e mod n
///
/// The code must already be below the modulus.
pub fn encrypt_code(code: &RsaBigInt, public_key: &RsaPublicKey) -> RsaBigInt {
    mod_pow(code, public_key.e(), public_key.n())
}

/// Encrypt a text character by character
///
/// Fails with [`RsaError::EncodingRange`] if any code point is not below `n`,
/// since it could not be recovered on decryption.
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &str) -> RsaResult<Ciphertext> {
    plaintext
        .chars()
        .map(|ch| {
            let code = from_u64(u64::from(ch as u32));
            if &code >= public_key.n() {
                return Err(RsaError::EncodingRange {
                    ch,
                    code: ch as u32,
                    modulus: public_key.n().clone(),
                });
            }
            Ok(encrypt_code(&code, public_key))
        })
        .collect()
}
