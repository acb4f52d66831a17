use secrecy::{ExposeSecret as _, SecretString};
use std::fmt::Debug;

use crate::uac::{Email, Username};

/// Account details an admin may change. The password is only sent when set.
#[derive(Clone)]
pub struct UserUpdateReqArgs {
    pub username: Username,
    pub email: Email,
    pub password: Option<SecretString>,
}

impl Debug for UserUpdateReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserUpdateReqArgs")
            .field("username", &self.username)
            .field("email", &self.email)
            .field(
                "has_password",
                &self
                    .password
                    .as_ref()
                    .is_some_and(|x| !x.expose_secret().is_empty()),
            )
            .finish()
    }
}
