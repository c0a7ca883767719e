//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod cart_repo;
pub mod carousel_repo;
pub mod category_repo;
pub mod collection_repo;
pub mod comment_repo;
pub mod date_stock_repo;
pub mod news_repo;
pub mod order_repo;
pub mod region_repo;
pub mod scenic_spot_repo;
pub mod ticket_type_repo;
pub mod user_repo;

pub use cart_repo::CartRepo;
pub use carousel_repo::CarouselRepo;
pub use category_repo::CategoryRepo;
pub use collection_repo::CollectionRepo;
pub use comment_repo::CommentRepo;
pub use date_stock_repo::DateStockRepo;
pub use news_repo::NewsRepo;
pub use order_repo::OrderRepo;
pub use region_repo::RegionRepo;
pub use scenic_spot_repo::ScenicSpotRepo;
pub use ticket_type_repo::TicketTypeRepo;
pub use user_repo::UserRepo;

/// Default page size for paginated listings.
pub const DEFAULT_LIMIT: i64 = 50;
/// Hard cap on page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit into `[1, MAX_LIMIT]`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a caller-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
