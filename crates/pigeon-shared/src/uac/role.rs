use std::{collections::BTreeSet, fmt::Display};

use serde::{Deserialize, Serialize};

/// Privilege tag attached to a user profile
///
/// The backend sends both `ADMIN` and `ROLE_ADMIN` style names. Both are
/// normalized to the same variant when parsed and the unprefixed form is
/// written back out. Matching is exact and case-sensitive. Anything else is
/// kept as [`RoleName::Unrecognized`] and never grants a privilege.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    User,
    Admin,
    SuperAdmin,
    Unrecognized(String),
}

impl RoleName {
    pub const PREFIX: &'static str = "ROLE_";

    pub fn as_str(&self) -> &str {
        match self {
            RoleName::User => "USER",
            RoleName::Admin => "ADMIN",
            RoleName::SuperAdmin => "SUPER_ADMIN",
            RoleName::Unrecognized(raw) => raw,
        }
    }

    /// Returns `true` if the role name is not [`Unrecognized`].
    ///
    /// [`Unrecognized`]: RoleName::Unrecognized
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(..))
    }

    fn from_known_tag(tag: &str) -> Option<Self> {
        match tag {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            _ => None,
        }
    }
}

impl From<String> for RoleName {
    fn from(value: String) -> Self {
        let tag = value.strip_prefix(Self::PREFIX).unwrap_or(&value);
        Self::from_known_tag(tag).unwrap_or(Self::Unrecognized(value))
    }
}

impl From<&str> for RoleName {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of roles held by one user. Never empty: a profile that arrives
/// without any role is a plain [`RoleName::User`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "Vec<RoleName>", into = "Vec<RoleName>")]
pub struct Roles(BTreeSet<RoleName>);

impl Roles {
    pub fn contains(&self, role: &RoleName) -> bool {
        self.0.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(&RoleName::Admin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.contains(&RoleName::SuperAdmin)
    }

    pub fn has_admin_privileges(&self) -> bool {
        self.is_admin() || self.is_super_admin()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleName> {
        self.0.iter()
    }
}

impl Default for Roles {
    fn default() -> Self {
        Self(BTreeSet::from([RoleName::User]))
    }
}

impl From<Vec<RoleName>> for Roles {
    fn from(value: Vec<RoleName>) -> Self {
        value.into_iter().collect()
    }
}

impl FromIterator<RoleName> for Roles {
    fn from_iter<T: IntoIterator<Item = RoleName>>(iter: T) -> Self {
        let set: BTreeSet<RoleName> = iter.into_iter().collect();
        if set.is_empty() {
            Self::default()
        } else {
            Self(set)
        }
    }
}

impl From<Roles> for Vec<RoleName> {
    fn from(value: Roles) -> Self {
        value.0.into_iter().collect()
    }
}
