//! Repository for the `ticket_types` table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::ticket_type::{CreateTicketType, TicketType, UpdateTicketType};

const COLUMNS: &str = "id, scenic_spot_id, name, kind, price, description, default_stock, \
                       is_active, created_at, updated_at";

pub struct TicketTypeRepo;

impl TicketTypeRepo {
    /// Insert a new ticket type, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTicketType) -> Result<TicketType, sqlx::Error> {
        let query = format!(
            "INSERT INTO ticket_types (scenic_spot_id, name, kind, price, description, default_stock)
             VALUES ($1, $2, $3, $4, COALESCE($5, ''), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketType>(&query)
            .bind(input.scenic_spot_id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.default_stock)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TicketType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ticket_types WHERE id = $1");
        sqlx::query_as::<_, TicketType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ticket types under a spot. `active_only` hides deactivated variants
    /// (public pages); admin screens pass `false`.
    pub async fn list_for_spot(
        pool: &PgPool,
        scenic_spot_id: DbId,
        active_only: bool,
    ) -> Result<Vec<TicketType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_types
             WHERE scenic_spot_id = $1 AND ($2 = false OR is_active)
             ORDER BY id"
        );
        sqlx::query_as::<_, TicketType>(&query)
            .bind(scenic_spot_id)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// All ticket types across the spots managed by one scenic admin.
    pub async fn list_for_admin_spots(
        pool: &PgPool,
        admin_id: DbId,
    ) -> Result<Vec<TicketType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_types
             WHERE scenic_spot_id IN (SELECT id FROM scenic_spots WHERE admin_id = $1)
             ORDER BY scenic_spot_id, id"
        );
        sqlx::query_as::<_, TicketType>(&query)
            .bind(admin_id)
            .fetch_all(pool)
            .await
    }

    /// Update a ticket type. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicketType,
    ) -> Result<Option<TicketType>, sqlx::Error> {
        let query = format!(
            "UPDATE ticket_types SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                price = COALESCE($4, price),
                description = COALESCE($5, description),
                default_stock = COALESCE($6, default_stock),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.default_stock)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Whether a ticket type belongs to a spot managed by `admin_id`.
    pub async fn is_managed_by(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM ticket_types t
                 JOIN scenic_spots s ON s.id = t.scenic_spot_id
                 WHERE t.id = $1 AND s.admin_id = $2
             )",
        )
        .bind(id)
        .bind(admin_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
