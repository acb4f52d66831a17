//! Client side core of the storefront: who is logged in, what they may do,
//! which views they may reach and the calls to the backend
//! NB: The assumption is made that the async runtime has already been started
//! before any request functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;
#[cfg(not(target_arch = "wasm32"))]
mod configuration;
pub mod policy;
pub mod routes;
mod session;

#[cfg(not(target_arch = "wasm32"))]
pub use configuration::{get_configuration, ClientSettings};
pub use client::{Client, UiCallBack, NO_ARGUMENTS};
pub use routes::{guard, nav_links, GuardDecision, NavItem, Route, RouteRequirement};
#[cfg(not(target_arch = "wasm32"))]
pub use session::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use session::LocalStorage;
pub use session::{MemoryStorage, SessionStorage, SessionStore};
