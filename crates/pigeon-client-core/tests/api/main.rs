#![cfg(not(target_arch = "wasm32"))]

mod admin_users;
mod catalog;
mod helpers;
mod login;
mod orders;
mod session;
