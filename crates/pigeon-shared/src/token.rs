use secrecy::{ExposeSecret as _, SecretString};
use std::fmt::Debug;

/// Bearer credential issued by the backend on login
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthToken")
            .field(&format_args!("[REDACTED]"))
            .finish()
    }
}
