//! Repository for the `scenic_spots` table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::scenic_spot::{
    CreateScenicSpot, ScenicSpot, ScenicSpotListing, SpotFilter, UpdateScenicSpot,
};

const COLUMNS: &str = "id, name, description, price, image_path, address, opening_hours, \
                       is_hot, region_id, category_id, tags, display_order, admin_id, \
                       is_active, created_at, updated_at";

/// Listing columns with region and category names joined in.
const LISTING_COLUMNS: &str =
    "s.id, s.name, s.description, s.price, s.image_path, s.address, s.opening_hours, \
     s.is_hot, s.region_id, r.name AS region_name, s.category_id, c.name AS category_name, \
     s.tags, s.is_active, s.created_at";

pub struct ScenicSpotRepo;

impl ScenicSpotRepo {
    /// Insert a new spot, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateScenicSpot) -> Result<ScenicSpot, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenic_spots
                (name, description, price, image_path, address, opening_hours, is_hot,
                 region_id, category_id, tags, admin_id)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, $6, COALESCE($7, false),
                     $8, $9, COALESCE($10, ''), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScenicSpot>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image_path)
            .bind(&input.address)
            .bind(&input.opening_hours)
            .bind(input.is_hot)
            .bind(input.region_id)
            .bind(input.category_id)
            .bind(&input.tags)
            .bind(input.admin_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ScenicSpot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenic_spots WHERE id = $1");
        sqlx::query_as::<_, ScenicSpot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a spot only if it is managed by the given scenic admin.
    ///
    /// Returns `None` both when the spot does not exist and when it belongs
    /// to someone else; callers surface both as not-found.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<Option<ScenicSpot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenic_spots WHERE id = $1 AND admin_id = $2");
        sqlx::query_as::<_, ScenicSpot>(&query)
            .bind(id)
            .bind(admin_id)
            .fetch_optional(pool)
            .await
    }

    /// Search/filter listing with region and category names, paginated.
    pub async fn list(
        pool: &PgPool,
        filter: &SpotFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScenicSpotListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             FROM scenic_spots s
             JOIN regions r ON r.id = s.region_id
             JOIN categories c ON c.id = s.category_id
             WHERE ($1::text IS NULL
                    OR s.name ILIKE '%' || $1 || '%'
                    OR s.address ILIKE '%' || $1 || '%'
                    OR r.name ILIKE '%' || $1 || '%')
               AND ($2::bigint IS NULL OR s.region_id = $2)
               AND ($3::bigint IS NULL OR s.category_id = $3)
               AND (NOT $4 OR s.is_hot)
               AND ($5 OR s.is_active)
             ORDER BY s.display_order, s.created_at DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, ScenicSpotListing>(&query)
            .bind(&filter.search)
            .bind(filter.region_id)
            .bind(filter.category_id)
            .bind(filter.hot_only)
            .bind(filter.include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Spots managed by one scenic admin.
    pub async fn list_for_admin(
        pool: &PgPool,
        admin_id: DbId,
    ) -> Result<Vec<ScenicSpot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenic_spots WHERE admin_id = $1 \
             ORDER BY display_order, created_at DESC"
        );
        sqlx::query_as::<_, ScenicSpot>(&query)
            .bind(admin_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent hot spots for the home page.
    pub async fn hot_spots(pool: &PgPool, limit: i64) -> Result<Vec<ScenicSpot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenic_spots
             WHERE is_hot AND is_active
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, ScenicSpot>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a spot. Only non-`None` fields in `input` are applied.
    ///
    /// When `owner` is set, the update only matches rows managed by that
    /// scenic admin.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: Option<DbId>,
        input: &UpdateScenicSpot,
    ) -> Result<Option<ScenicSpot>, sqlx::Error> {
        let query = format!(
            "UPDATE scenic_spots SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                image_path = COALESCE($6, image_path),
                address = COALESCE($7, address),
                opening_hours = COALESCE($8, opening_hours),
                is_hot = COALESCE($9, is_hot),
                region_id = COALESCE($10, region_id),
                category_id = COALESCE($11, category_id),
                tags = COALESCE($12, tags),
                display_order = COALESCE($13, display_order),
                is_active = COALESCE($14, is_active),
                updated_at = NOW()
             WHERE id = $1 AND ($2::bigint IS NULL OR admin_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScenicSpot>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image_path)
            .bind(&input.address)
            .bind(&input.opening_hours)
            .bind(input.is_hot)
            .bind(input.region_id)
            .bind(input.category_id)
            .bind(&input.tags)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a spot. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE scenic_spots SET is_active = false, updated_at = NOW() \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of spots, optionally scoped to one managing admin.
    pub async fn count(pool: &PgPool, admin_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM scenic_spots WHERE ($1::bigint IS NULL OR admin_id = $1)",
        )
        .bind(admin_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

}
