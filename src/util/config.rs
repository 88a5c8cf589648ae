// Key Generation Configuration
// Sampling range and retry budgets, with environment overrides

use std::env;
use std::str::FromStr;

use crate::rsa::bigint::{from_u64, RsaBigInt};
use crate::rsa::error::{RsaError, RsaResult};

/// Default lower bound for prime sampling
pub const RANDOM_START: u64 = 1_000;
/// Default upper bound for prime sampling
pub const RANDOM_END: u64 = 100_000;
/// Default number of candidates drawn before giving up on a prime
pub const MAX_PRIME_ATTEMPTS: u32 = 10_000;
/// Default number of draws before giving up on a public exponent
pub const MAX_EXPONENT_ATTEMPTS: u32 = 10_000;

/// Configuration for key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    pub start: u64,
    pub end: u64,
    pub max_prime_attempts: u32,
    pub max_exponent_attempts: u32,
    /// Redraw `q` while it equals `p`; off by default so `n = p^2` can occur
    pub require_distinct_primes: bool,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            start: RANDOM_START,
            end: RANDOM_END,
            max_prime_attempts: MAX_PRIME_ATTEMPTS,
            max_exponent_attempts: MAX_EXPONENT_ATTEMPTS,
            require_distinct_primes: false,
        }
    }
}

impl KeyGenConfig {
    /// Defaults overridden by `RSA_RANDOM_START`, `RSA_RANDOM_END`,
    /// `RSA_MAX_PRIME_ATTEMPTS`, `RSA_MAX_EXPONENT_ATTEMPTS` and `RSA_DISTINCT_PRIMES`
    ///
    /// `RSA_DISTINCT_PRIMES` must be exactly `true` or `false`; values such as
    /// `1` or `yes` are rejected with [`RsaError::InvalidConfig`].
    pub fn from_env() -> RsaResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`KeyGenConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> RsaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            start: parse_var(&lookup, "RSA_RANDOM_START")?.unwrap_or(defaults.start),
            end: parse_var(&lookup, "RSA_RANDOM_END")?.unwrap_or(defaults.end),
            max_prime_attempts: parse_var(&lookup, "RSA_MAX_PRIME_ATTEMPTS")?
                .unwrap_or(defaults.max_prime_attempts),
            max_exponent_attempts: parse_var(&lookup, "RSA_MAX_EXPONENT_ATTEMPTS")?
                .unwrap_or(defaults.max_exponent_attempts),
            require_distinct_primes: parse_var(&lookup, "RSA_DISTINCT_PRIMES")?
                .unwrap_or(defaults.require_distinct_primes),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_range(mut self, start: u64, end: u64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_max_prime_attempts(mut self, attempts: u32) -> Self {
        self.max_prime_attempts = attempts;
        self
    }

    pub fn with_max_exponent_attempts(mut self, attempts: u32) -> Self {
        self.max_exponent_attempts = attempts;
        self
    }

    pub fn with_distinct_primes(mut self, distinct: bool) -> Self {
        self.require_distinct_primes = distinct;
        self
    }

    /// Check bounds order and that both retry budgets are non-zero
    pub fn validate(&self) -> RsaResult<()> {
        if self.start > self.end {
            return Err(RsaError::InvalidRange {
                start: from_u64(self.start),
                end: from_u64(self.end),
            });
        }
        if self.max_prime_attempts == 0 {
            return Err(RsaError::InvalidConfig {
                message: "max_prime_attempts must be greater than 0".to_string(),
            });
        }
        if self.max_exponent_attempts == 0 {
            return Err(RsaError::InvalidConfig {
                message: "max_exponent_attempts must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Sampling bounds as big integers
    pub fn range(&self) -> (RsaBigInt, RsaBigInt) {
        (from_u64(self.start), from_u64(self.end))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> RsaResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| RsaError::InvalidConfig {
                message: format!("{}={:?}: {}", key, raw, e),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = KeyGenConfig::default();
        assert_eq!(config.start, 1_000);
        assert_eq!(config.end, 100_000);
        assert!(!config.require_distinct_primes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_without_overrides_is_default() {
        let config = KeyGenConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, KeyGenConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = KeyGenConfig::from_lookup(lookup_from(&[
            ("RSA_RANDOM_START", "200"),
            ("RSA_RANDOM_END", " 500 "),
            ("RSA_MAX_PRIME_ATTEMPTS", "42"),
            ("RSA_DISTINCT_PRIMES", "true"),
        ]))
        .unwrap();

        assert_eq!(config.range(), (from_u64(200), from_u64(500)));
        assert_eq!(config.max_prime_attempts, 42);
        assert_eq!(config.max_exponent_attempts, MAX_EXPONENT_ATTEMPTS);
        assert!(config.require_distinct_primes);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let result = KeyGenConfig::from_lookup(lookup_from(&[("RSA_RANDOM_END", "lots")]));
        assert!(matches!(result, Err(RsaError::InvalidConfig { .. })));
    }

    #[test]
    fn test_distinct_primes_flag_is_strict_bool() {
        for raw in ["1", "yes", "TRUE"] {
            let result = KeyGenConfig::from_lookup(lookup_from(&[("RSA_DISTINCT_PRIMES", raw)]));
            assert!(matches!(result, Err(RsaError::InvalidConfig { .. })), "{} accepted", raw);
        }

        let config = KeyGenConfig::from_lookup(lookup_from(&[("RSA_DISTINCT_PRIMES", "false")])).unwrap();
        assert!(!config.require_distinct_primes);
    }

    #[test]
    fn test_lookup_rejects_inverted_range() {
        let result = KeyGenConfig::from_lookup(lookup_from(&[
            ("RSA_RANDOM_START", "900"),
            ("RSA_RANDOM_END", "100"),
        ]));
        assert!(matches!(result, Err(RsaError::InvalidRange { .. })));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = KeyGenConfig::default().with_max_exponent_attempts(0);
        assert!(matches!(config.validate(), Err(RsaError::InvalidConfig { .. })));
    }
}
