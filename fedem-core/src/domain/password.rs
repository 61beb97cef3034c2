use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_LENGTH: usize = 8;
const ALLOWED_SYMBOLS: &str = "@$!%*?&";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(
        "Password must be at least 8 characters long and include uppercase, lowercase, number, and special character."
    )]
    TooWeak,
}

/// Candidate password that satisfies the composition rule: minimum length,
/// at least one lowercase, uppercase, digit and symbol from a fixed set,
/// and nothing outside those character classes.
#[derive(Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret();
        if raw.len() < MIN_LENGTH {
            return Err(PasswordError::TooWeak);
        }
        let mut lower = false;
        let mut upper = false;
        let mut digit = false;
        let mut symbol = false;
        for c in raw.chars() {
            match c {
                'a'..='z' => lower = true,
                'A'..='Z' => upper = true,
                '0'..='9' => digit = true,
                c if ALLOWED_SYMBOLS.contains(c) => symbol = true,
                _ => return Err(PasswordError::TooWeak),
            }
        }
        if lower && upper && digit && symbol {
            Ok(Self(value))
        } else {
            Err(PasswordError::TooWeak)
        }
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
