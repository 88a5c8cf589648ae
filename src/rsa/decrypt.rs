// RSA Decryption Implementation
// Inverts the per-character transform with the private exponent

use num_traits::ToPrimitive;

use super::bigint::{mod_pow, RsaBigInt};
use super::error::{RsaError, RsaResult};
use super::keygen::RsaPrivateKey;

/// Decrypt a single integer: value^d mod n
pub fn decrypt_code(value: &RsaBigInt, private_key: &RsaPrivateKey) -> RsaBigInt {
    mod_pow(value, private_key.d(), private_key.n())
}

/// Decrypt a ciphertext back into text
///
/// Each value must lie in `[0, n)` and decrypt to a Unicode scalar value.
pub fn decrypt(private_key: &RsaPrivateKey, ciphertext: &[RsaBigInt]) -> RsaResult<String> {
    let mut plaintext = String::with_capacity(ciphertext.len());

    for (index, value) in ciphertext.iter().enumerate() {
        if value >= private_key.n() {
            return Err(RsaError::CiphertextRange {
                index,
                modulus: private_key.n().clone(),
            });
        }

        let code = decrypt_code(value, private_key);
        let ch = code
            .to_u32()
            .and_then(char::from_u32)
            .ok_or_else(|| RsaError::InvalidCodePoint { value: code.clone() })?;
        plaintext.push(ch);
    }

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::encrypt::encrypt;
    use crate::rsa::keygen::{generate_rsa_keys, keys_from_primes};
    use crate::util::config::KeyGenConfig;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn textbook_private_key() -> RsaPrivateKey {
        RsaPrivateKey::new(from_u64(2753), from_u64(3233)).unwrap()
    }

    #[test]
    fn test_decrypt_textbook_code() {
        let key = textbook_private_key();
        assert_eq!(decrypt_code(&from_u64(2790), &key), from_u64(65));
        assert_eq!(decrypt(&key, &[from_u64(2790)]).unwrap(), "A");
    }

    #[test]
    fn test_decrypt_empty() {
        let key = textbook_private_key();
        assert_eq!(decrypt(&key, &[]).unwrap(), "");
    }

    #[test]
    fn test_decrypt_rejects_out_of_range_value() {
        let key = textbook_private_key();

        let result = decrypt(&key, &[from_u64(2790), from_u64(3233)]);
        assert_eq!(
            result,
            Err(RsaError::CiphertextRange {
                index: 1,
                modulus: from_u64(3233),
            })
        );
    }

    #[test]
    fn test_decrypt_rejects_surrogate_code() {
        // 0xD800 is a surrogate, not a char; e = d = 1 leaves it unchanged
        let key = RsaPrivateKey::new(from_u64(1), from_u64(1_000_003)).unwrap();

        let result = decrypt(&key, &[from_u64(0xD800)]);
        assert_eq!(
            result,
            Err(RsaError::InvalidCodePoint {
                value: from_u64(0xD800),
            })
        );
    }

    #[test]
    fn test_roundtrip_textbook_key() {
        let (private_key, public_key) =
            keys_from_primes(&from_u64(61), &from_u64(53), &from_u64(17)).unwrap();
        let message = "My name is Malik Makkes.";

        let ciphertext = public_key.encrypt(message).unwrap();
        assert_eq!(private_key.decrypt(&ciphertext).unwrap(), message);
    }

    #[test]
    fn test_roundtrip_unicode() {
        let config = KeyGenConfig::default().with_distinct_primes(true);
        let (private_key, public_key) =
            generate_rsa_keys(&mut StdRng::seed_from_u64(2024), &config).unwrap();
        let message = "Grüße, κόσμε! 🦀";

        let ciphertext = encrypt(&public_key, message).unwrap();
        assert_eq!(decrypt(&private_key, &ciphertext).unwrap(), message);
    }

    #[test]
    fn test_roundtrip_empty() {
        let (private_key, public_key) =
            keys_from_primes(&from_u64(61), &from_u64(53), &from_u64(17)).unwrap();

        let ciphertext = encrypt(&public_key, "").unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(decrypt(&private_key, &ciphertext).unwrap(), "");
    }

    proptest! {
        #[test]
        fn test_roundtrip_generated_keys(seed in any::<u64>(), message in "[ -~]{0,40}") {
            let config = KeyGenConfig::default().with_distinct_primes(true);
            let (private_key, public_key) =
                generate_rsa_keys(&mut StdRng::seed_from_u64(seed), &config).unwrap();

            let ciphertext = encrypt(&public_key, &message).unwrap();
            prop_assert_eq!(ciphertext.len(), message.chars().count());
            prop_assert_eq!(decrypt(&private_key, &ciphertext).unwrap(), message);
        }
    }
}
