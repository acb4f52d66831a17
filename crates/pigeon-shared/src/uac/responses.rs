use crate::token::AuthToken;

use super::UserProfile;

/// Body of a successful login. The token sits next to the profile fields.
#[derive(serde::Deserialize)]
pub struct LoginResponse {
    token: String,
    #[serde(flatten)]
    pub user: UserProfile,
}

impl LoginResponse {
    /// Splits the response into the two halves of a session
    pub fn into_parts(self) -> (AuthToken, UserProfile) {
        (self.token.into(), self.user)
    }
}
