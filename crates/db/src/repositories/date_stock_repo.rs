//! Repository for the `date_stocks` inventory ledger.
//!
//! Reservation and release are single conditional UPDATE statements so that
//! concurrent purchases of the same (ticket type, date) serialize on the row:
//! the check and the write are one atomic step, and the losing request sees
//! zero rows affected instead of driving `stock` negative.

use chrono::NaiveDate;
use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::date_stock::{DateStock, ReserveOutcome};

const COLUMNS: &str = "id, ticket_type_id, use_date, stock, sold, created_at, updated_at";

pub struct DateStockRepo;

impl DateStockRepo {
    /// Return the ledger row for (ticket type, date), creating it seeded
    /// with `default_stock` if it does not exist yet.
    ///
    /// `INSERT .. ON CONFLICT DO NOTHING` makes concurrent first purchases
    /// converge on a single row; whichever insert loses simply reads the
    /// winner's row back.
    pub async fn get_or_create(
        pool: &PgPool,
        ticket_type_id: DbId,
        use_date: NaiveDate,
        default_stock: i32,
    ) -> Result<DateStock, sqlx::Error> {
        sqlx::query(
            "INSERT INTO date_stocks (ticket_type_id, use_date, stock)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_date_stocks_ticket_date DO NOTHING",
        )
        .bind(ticket_type_id)
        .bind(use_date)
        .bind(default_stock.max(0))
        .execute(pool)
        .await?;

        let query =
            format!("SELECT {COLUMNS} FROM date_stocks WHERE ticket_type_id = $1 AND use_date = $2");
        sqlx::query_as::<_, DateStock>(&query)
            .bind(ticket_type_id)
            .bind(use_date)
            .fetch_one(pool)
            .await
    }

    /// The existing ledger row for a date, if any. Absence means no sale or
    /// stock edit has touched that date yet.
    pub async fn find_for_date(
        pool: &PgPool,
        ticket_type_id: DbId,
        use_date: NaiveDate,
    ) -> Result<Option<DateStock>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM date_stocks WHERE ticket_type_id = $1 AND use_date = $2");
        sqlx::query_as::<_, DateStock>(&query)
            .bind(ticket_type_id)
            .bind(use_date)
            .fetch_optional(pool)
            .await
    }

    /// Atomically reserve `qty` units: stock -= qty, sold += qty, guarded by
    /// `stock >= qty`. Zero rows affected means insufficient stock.
    pub async fn reserve(
        pool: &PgPool,
        id: DbId,
        qty: i32,
    ) -> Result<ReserveOutcome, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE date_stocks
             SET stock = stock - $2, sold = sold + $2, updated_at = NOW()
             WHERE id = $1 AND stock >= $2",
        )
        .bind(id)
        .bind(qty)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(ReserveOutcome::Reserved)
        } else {
            Ok(ReserveOutcome::InsufficientStock)
        }
    }

    /// Return `qty` units to the ledger: stock += qty, sold -= qty, guarded
    /// by `sold >= qty` so a double-processed cancellation or refund cannot
    /// inflate stock past its original ceiling.
    ///
    /// Returns `true` if the release was applied.
    pub async fn release(pool: &PgPool, id: DbId, qty: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE date_stocks
             SET stock = stock + $2, sold = sold - $2, updated_at = NOW()
             WHERE id = $1 AND sold >= $2",
        )
        .bind(id)
        .bind(qty)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the remaining stock for a date outright (scenic-admin stock edit),
    /// creating the ledger row if absent. `sold` is untouched.
    pub async fn set_stock(
        pool: &PgPool,
        ticket_type_id: DbId,
        use_date: NaiveDate,
        stock: i32,
    ) -> Result<DateStock, sqlx::Error> {
        let query = format!(
            "INSERT INTO date_stocks (ticket_type_id, use_date, stock)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_date_stocks_ticket_date
             DO UPDATE SET stock = EXCLUDED.stock, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DateStock>(&query)
            .bind(ticket_type_id)
            .bind(use_date)
            .bind(stock.max(0))
            .fetch_one(pool)
            .await
    }
}
