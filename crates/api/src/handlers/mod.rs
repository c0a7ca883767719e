//! HTTP handler modules, one per API resource.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod collections;
pub mod news;
pub mod orders;
pub mod profile;
pub mod scenic;
