use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsernameError {
    #[error("Username is required")]
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: String) -> Result<Self, UsernameError> {
        if raw.trim().is_empty() {
            return Err(UsernameError::Missing);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
