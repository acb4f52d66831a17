//! Operations the backend only accepts from users with admin privileges

mod categories;
mod orders;
mod products;
mod users;
