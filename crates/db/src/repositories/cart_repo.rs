//! Repository for the `cart_items` table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::cart_item::{AddCartItem, CartItem, CartItemListing};

const COLUMNS: &str = "id, user_id, scenic_spot_id, ticket_type_id, use_date, quantity, \
                       created_at, updated_at";

pub struct CartRepo;

impl CartRepo {
    /// Add a line to the user's cart. If the same (spot, ticket type, date)
    /// line already exists, quantities are merged.
    pub async fn upsert_line(
        pool: &PgPool,
        user_id: DbId,
        input: &AddCartItem,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (user_id, scenic_spot_id, ticket_type_id, use_date, quantity)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_cart_items_line
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(input.scenic_spot_id)
            .bind(input.ticket_type_id)
            .bind(input.use_date)
            .bind(input.quantity)
            .fetch_one(pool)
            .await
    }

    /// A cart line, only if it belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cart_items WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The user's cart with spot and ticket type details joined, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartItemListing>, sqlx::Error> {
        sqlx::query_as::<_, CartItemListing>(
            "SELECT ci.id, ci.scenic_spot_id, s.name AS spot_name,
                    ci.ticket_type_id, t.name AS ticket_type_name, t.price AS unit_price,
                    ci.use_date, ci.quantity, ci.created_at
             FROM cart_items ci
             JOIN scenic_spots s ON s.id = ci.scenic_spot_id
             JOIN ticket_types t ON t.id = ci.ticket_type_id
             WHERE ci.user_id = $1
             ORDER BY ci.created_at",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Remove a line from the user's cart. Returns `true` if removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
