use std::fmt::Display;

use chrono::NaiveDateTime;

use crate::{errors::ConversionError, id::RecordId};

use super::Roles;

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
/// Represents a username and is constrained to not be an empty string
pub struct Username(String);

#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Email(String);

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<String> for Email {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Email {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user as the backend describes it. Stored in the session on login and
/// listed on the user management screen.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: RecordId,
    pub username: Username,
    #[serde(default)]
    pub email: Email,
    #[serde(default)]
    pub roles: Roles,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Not included in login responses
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn enabled_by_default() -> bool {
    true
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    pub fn is_super_admin(&self) -> bool {
        self.roles.is_super_admin()
    }

    pub fn has_admin_privileges(&self) -> bool {
        self.roles.has_admin_privileges()
    }

    pub fn same_user(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
