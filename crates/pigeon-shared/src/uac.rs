//! Shared items related to user account control

mod responses;
mod role;
mod user;

pub use responses::LoginResponse;
pub use role::{RoleName, Roles};
pub use user::{Email, UserProfile, Username};
