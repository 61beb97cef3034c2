use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

// Same shape check the public API has always advertised: something@something.tld
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email is required")]
    Missing,
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Validated email address. The inner value is wrapped in [`Secret`] so it
/// never shows up in debug output or logs.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    /// Case-insensitive comparison against another address, used for the
    /// configured admin-email bootstrap.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.expose_secret().eq_ignore_ascii_case(other)
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret();
        if raw.is_empty() {
            return Err(EmailError::Missing);
        }
        if !EMAIL_PATTERN.is_match(raw) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
