// RSA Big Integer Operations
// Trial-division primality, Euclid and modular arithmetic over num-bigint

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::error::{RsaError, RsaResult};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Trial-division primality test
///
/// Divides by every odd integer from 3 up to and including `floor(sqrt(num))`,
/// so squares of odd primes such as 9, 25 and 49 are reported composite.
pub fn is_prime(num: &RsaBigInt) -> bool {
    let two = RsaBigInt::from(2u8);

    if num < &two {
        return false;
    }
    if num == &two {
        return true;
    }
    if num.is_even() {
        return false;
    }

    let limit = num.sqrt();
    let mut divisor = RsaBigInt::from(3u8);

    while divisor <= limit {
        if (num % &divisor).is_zero() {
            return false;
        }
        divisor += 2u8;
    }

    true
}

/// Greatest common divisor (iterative Euclid)
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }

    a
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = old_r.div_floor(&r);

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m, normalised into [0, m)
///
/// The gcd returned by [`extended_gcd`] is checked; anything other than 1
/// yields [`RsaError::NotInvertible`].
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> RsaResult<RsaBigInt> {
    if m.is_zero() {
        return Err(RsaError::NotInvertible {
            a: a.clone(),
            m: m.clone(),
            gcd: a.clone(),
        });
    }

    let signed_a = BigInt::from_biguint(Sign::Plus, a.clone());
    let signed_m = BigInt::from_biguint(Sign::Plus, m.clone());
    let (g, x, _) = extended_gcd(&signed_a, &signed_m);

    if !g.is_one() {
        return Err(RsaError::NotInvertible {
            a: a.clone(),
            m: m.clone(),
            gcd: g.magnitude().clone(),
        });
    }

    // ((x % m) + m) % m
    let normalised = ((x % &signed_m) + &signed_m) % &signed_m;
    Ok(normalised.magnitude().clone())
}

/// Modular exponentiation: base^exp mod modulus
///
/// # Panics
///
/// Panics if `modulus` is zero; key constructors never allow that.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    base.modpow(exp, modulus)
}
