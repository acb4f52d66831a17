//! This module stores the expected format of the arguments for the requests.
//! Structs holding passwords are not serializable, the client builds their
//! request bodies explicitly so secrets are only exposed at that point.

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{
    catalog::PageRequest,
    id::RecordId,
    orders::Quantity,
    uac::{Email, Username},
};

pub mod admin;

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = username;
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = password;
        self
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct RegisterReqArgs {
    pub username: Username,
    pub email: Email,
    pub password: SecretString,
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReqArgs {
    pub product_id: RecordId,
    #[serde(rename = "quantite")]
    pub quantity: Quantity,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SearchReqArgs {
    pub keyword: String,
    pub page: u32,
    pub size: u32,
}

impl SearchReqArgs {
    pub fn new<S: Into<String>>(keyword: S, page_request: PageRequest) -> Self {
        Self {
            keyword: keyword.into(),
            page: page_request.page,
            size: page_request.size,
        }
    }
}
