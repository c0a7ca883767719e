//! Domain types shared between the database layer and the HTTP API.

pub mod error;
pub mod order;
pub mod roles;
pub mod types;
