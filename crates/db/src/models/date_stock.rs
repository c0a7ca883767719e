//! Per-date inventory ledger model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `date_stocks` table: remaining `stock` and cumulative
/// `sold` for one (ticket type, use date) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DateStock {
    pub id: DbId,
    pub ticket_type_id: DbId,
    pub use_date: NaiveDate,
    pub stock: i32,
    pub sold: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an inventory reservation attempt.
///
/// `InsufficientStock` is an expected outcome, not an error: the caller
/// decides whether it aborts a buy-now request or skips one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved,
    InsufficientStock,
}
