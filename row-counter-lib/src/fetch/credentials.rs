use crate::error::ProbeError;
use core::fmt;

/// Basic-auth credentials for the report server.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Both parts must be non-empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ProbeError> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() || password.is_empty() {
            return Err(ProbeError::config("username and password are required"));
        }

        Ok(Self { username, password })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
