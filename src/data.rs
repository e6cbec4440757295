//! Test data generation
//!
//! Produces credentials for throwaway accounts. The remote service enforces
//! a password policy (at least 8 characters with an upper, a lower, a digit
//! and a symbol), so passwords are built by construction: one character from
//! each required class, the remainder drawn from the union alphabet, then
//! shuffled.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

const PASSWORD_LEN: usize = 10;

/// Credentials for one throwaway account
///
/// Consumed by a single scenario and never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Generate a fresh set of credentials
    ///
    /// The username embeds a v4 UUID fragment, which makes collisions
    /// within a test run vanishingly unlikely.
    pub fn generate() -> Self {
        let credentials = Self {
            username: random_username(),
            password: random_password(),
        };
        tracing::debug!(username = %credentials.username, "generated credentials");
        credentials
    }
}

fn random_username() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("user_{}", &id[..8])
}

fn random_password() -> String {
    let mut rng = rand::thread_rng();
    let all: Vec<u8> = [LOWER, UPPER, DIGITS, SYMBOLS].concat();

    loop {
        let mut chars = Vec::with_capacity(PASSWORD_LEN);
        chars.push(LOWER[rng.gen_range(0..LOWER.len())]);
        chars.push(UPPER[rng.gen_range(0..UPPER.len())]);
        chars.push(DIGITS[rng.gen_range(0..DIGITS.len())]);
        chars.push(SYMBOLS[rng.gen_range(0..SYMBOLS.len())]);
        while chars.len() < PASSWORD_LEN {
            chars.push(all[rng.gen_range(0..all.len())]);
        }
        chars.shuffle(&mut rng);

        // Unreachable given the construction above, but regenerating is
        // cheaper than ever handing out an invalid credential.
        let password = String::from_utf8(chars).unwrap_or_default();
        if password_meets_policy(&password) {
            return password;
        }
    }
}

/// Check a password against the service's complexity policy
pub fn password_meets_policy(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_generated_password_meets_policy() {
        for _ in 0..500 {
            let creds = Credentials::generate();
            assert!(
                password_meets_policy(&creds.password),
                "policy violated by '{}'",
                creds.password
            );
            assert_eq!(creds.password.len(), PASSWORD_LEN);
        }
    }

    #[test]
    fn usernames_do_not_collide_within_a_run() {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let creds = Credentials::generate();
            assert!(creds.username.starts_with("user_"));
            assert_eq!(creds.username.len(), "user_".len() + 8);
            assert!(seen.insert(creds.username), "duplicate username generated");
        }
    }

    #[test]
    fn policy_rejects_weak_passwords() {
        assert!(!password_meets_policy("short1!"));
        assert!(!password_meets_policy("alllowercase1!"));
        assert!(!password_meets_policy("ALLUPPERCASE1!"));
        assert!(!password_meets_policy("NoDigitsHere!"));
        assert!(!password_meets_policy("NoSymbols123"));
        assert!(password_meets_policy("Pa@ab12c1aA!"));
    }
}
