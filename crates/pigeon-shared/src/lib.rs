//! Code shared between the storefront clients and the backends they talk to

#![warn(unused_crate_dependencies)]

pub mod catalog;
pub mod const_config;
pub mod dashboard;
pub mod errors;
pub mod id;
mod macros;
pub mod orders;
pub mod req_args;
pub mod token;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
