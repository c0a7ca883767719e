//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod cart_item;
pub mod carousel;
pub mod category;
pub mod collection;
pub mod comment;
pub mod date_stock;
pub mod news;
pub mod order;
pub mod region;
pub mod scenic_spot;
pub mod ticket_type;
pub mod user;
