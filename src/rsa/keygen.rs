// RSA Key Generation
// Rejection-sampled primes and exponents composed into a key pair

use num_bigint::RandBigInt;
use num_traits::One;
use rand::thread_rng;
use tracing::{debug, warn};

use super::bigint::{gcd, is_prime, mod_inverse, RsaBigInt};
use super::error::{RsaError, RsaResult};
use crate::util::config::KeyGenConfig;

/// RSA Public Key `(e, n)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    e: RsaBigInt,
    n: RsaBigInt,
}

/// RSA Private Key `(d, n)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    d: RsaBigInt,
    n: RsaBigInt,
}

impl RsaPublicKey {
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> RsaResult<Self> {
        check_modulus(&n)?;
        Ok(Self { e, n })
    }

    /// Public exponent
    pub fn e(&self) -> &RsaBigInt {
        &self.e
    }

    /// Modulus
    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a text using this public key
    pub fn encrypt(&self, plaintext: &str) -> RsaResult<Vec<RsaBigInt>> {
        super::encrypt::encrypt(self, plaintext)
    }
}

impl RsaPrivateKey {
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> RsaResult<Self> {
        check_modulus(&n)?;
        Ok(Self { d, n })
    }

    /// Private exponent
    pub fn d(&self) -> &RsaBigInt {
        &self.d
    }

    /// Modulus
    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &[RsaBigInt]) -> RsaResult<String> {
        super::decrypt::decrypt(self, ciphertext)
    }
}

fn check_modulus(n: &RsaBigInt) -> RsaResult<()> {
    if n < &RsaBigInt::from(2u8) {
        return Err(RsaError::InvalidKey {
            message: format!("modulus must be at least 2, got {}", n),
        });
    }
    Ok(())
}

/// Draw uniformly from `[start, end]` until a prime comes up
///
/// Gives up with [`RsaError::NoPrimeFound`] after `max_attempts` composite draws.
pub fn generate_large_prime<R>(
    rng: &mut R,
    start: &RsaBigInt,
    end: &RsaBigInt,
    max_attempts: u32,
) -> RsaResult<RsaBigInt>
where
    R: RandBigInt + ?Sized,
{
    if start > end {
        return Err(RsaError::InvalidRange {
            start: start.clone(),
            end: end.clone(),
        });
    }
    if max_attempts == 0 {
        return Err(RsaError::InvalidConfig {
            message: "max_attempts must be greater than 0".to_string(),
        });
    }

    let upper = end + 1u8;

    for attempt in 1..=max_attempts {
        let candidate = rng.gen_biguint_range(start, &upper);
        if is_prime(&candidate) {
            debug!(attempt, bits = candidate.bits(), "prime candidate accepted");
            return Ok(candidate);
        }
    }

    Err(RsaError::NoPrimeFound {
        start: start.clone(),
        end: end.clone(),
        attempts: max_attempts,
    })
}

/// Build both keys from chosen primes and public exponent
///
/// `d` is the inverse of `e` modulo `(p-1)(q-1)`, normalised into `[0, φ)`.
pub fn keys_from_primes(
    p: &RsaBigInt,
    q: &RsaBigInt,
    e: &RsaBigInt,
) -> RsaResult<(RsaPrivateKey, RsaPublicKey)> {
    let n = p * q;
    let phi = totient(p, q);
    let d = mod_inverse(e, &phi)?;

    let private_key = RsaPrivateKey::new(d, n.clone())?;
    let public_key = RsaPublicKey::new(e.clone(), n)?;

    Ok((private_key, public_key))
}

/// Generate an RSA key pair, private key first
///
/// `p` and `q` are drawn independently. A collision gives `n = p^2` and a key
/// that cannot round-trip; it is only redrawn when
/// [`KeyGenConfig::require_distinct_primes`] is set.
pub fn generate_rsa_keys<R>(
    rng: &mut R,
    config: &KeyGenConfig,
) -> RsaResult<(RsaPrivateKey, RsaPublicKey)>
where
    R: RandBigInt + ?Sized,
{
    config.validate()?;
    let (start, end) = config.range();

    let p = generate_large_prime(rng, &start, &end, config.max_prime_attempts)?;
    let mut q = generate_large_prime(rng, &start, &end, config.max_prime_attempts)?;

    if p == q {
        if config.require_distinct_primes {
            q = redraw_distinct(rng, &p, &start, &end, config.max_prime_attempts)?;
        } else {
            warn!(prime = %p, "p and q collided, modulus is a perfect square");
        }
    }

    let phi = totient(&p, &q);
    let e = pick_public_exponent(rng, &phi, config.max_exponent_attempts)?;
    let (private_key, public_key) = keys_from_primes(&p, &q, &e)?;

    debug!(bits = public_key.bit_length(), "generated RSA key pair");

    Ok((private_key, public_key))
}

/// Generate a key pair with the thread-local RNG and default configuration
pub fn generate_default_keys() -> RsaResult<(RsaPrivateKey, RsaPublicKey)> {
    generate_rsa_keys(&mut thread_rng(), &KeyGenConfig::default())
}

fn totient(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    let one = RsaBigInt::one();
    if p <= &one || q <= &one {
        return RsaBigInt::default();
    }
    (p - 1u8) * (q - 1u8)
}

/// Draw a prime different from `p`, spending at most `max_attempts` draws in total
fn redraw_distinct<R>(
    rng: &mut R,
    p: &RsaBigInt,
    start: &RsaBigInt,
    end: &RsaBigInt,
    max_attempts: u32,
) -> RsaResult<RsaBigInt>
where
    R: RandBigInt + ?Sized,
{
    let upper = end + 1u8;

    for attempt in 1..=max_attempts {
        let candidate = rng.gen_biguint_range(start, &upper);
        if &candidate != p && is_prime(&candidate) {
            debug!(attempt, "distinct prime accepted");
            return Ok(candidate);
        }
    }

    Err(RsaError::NoPrimeFound {
        start: start.clone(),
        end: end.clone(),
        attempts: max_attempts,
    })
}

/// Sample `e` in `[1, φ)` until `gcd(e, φ) = 1`
fn pick_public_exponent<R>(rng: &mut R, phi: &RsaBigInt, max_attempts: u32) -> RsaResult<RsaBigInt>
where
    R: RandBigInt + ?Sized,
{
    let one = RsaBigInt::one();
    if phi <= &one {
        return Err(RsaError::DegenerateTotient { phi: phi.clone() });
    }

    for attempt in 1..=max_attempts {
        let e = rng.gen_biguint_range(&one, phi);
        if gcd(&e, phi).is_one() {
            debug!(attempt, "public exponent accepted");
            return Ok(e);
        }
    }

    Err(RsaError::ExponentSearchExhausted {
        attempts: max_attempts,
    })
}
