//! Role discriminants stored in `users.role`.
//!
//! These must match the values seeded by the migrations: 0 is an ordinary
//! visitor, 1 a scenic-spot admin scoped to the spots they manage, 2 the
//! platform admin with access to everything.

/// Role column type matching SMALLINT in the database.
pub type RoleId = i16;

pub const ROLE_VISITOR: RoleId = 0;
pub const ROLE_SCENIC_ADMIN: RoleId = 1;
pub const ROLE_ADMIN: RoleId = 2;

/// Whether `role` is a known discriminant.
pub fn is_valid_role(role: RoleId) -> bool {
    matches!(role, ROLE_VISITOR | ROLE_SCENIC_ADMIN | ROLE_ADMIN)
}
