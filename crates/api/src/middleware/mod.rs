//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the platform admin role.
//! - [`rbac::RequireScenicAdmin`] -- Requires scenic admin or platform admin role.

pub mod auth;
pub mod rbac;
