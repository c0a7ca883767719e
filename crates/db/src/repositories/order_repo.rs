//! Repository for the `orders` table.
//!
//! Status transitions are conditional updates (`WHERE status = expected`)
//! so the state-machine checks hold even when two requests race on the same
//! order: exactly one sees a row affected.

use rust_decimal::Decimal;
use sqlx::PgPool;
use trekpass_core::order::{OrderStatus, StatusId};
use trekpass_core::types::DbId;

use crate::models::order::{CreateOrder, Order, OrderFilter, OrderListing, OrderStatusCounts};

const COLUMNS: &str = "id, user_id, scenic_spot_id, ticket_type_id, use_date, quantity, \
                       total_price, order_number, status, refund_reason, refund_amount, \
                       refund_apply_at, refund_audit_at, created_at, updated_at";

/// Listing columns with buyer, spot, and ticket type names joined in.
const LISTING_COLUMNS: &str =
    "o.id, o.order_number, o.user_id, u.email AS user_email, o.scenic_spot_id, \
     s.name AS spot_name, o.ticket_type_id, t.name AS ticket_type_name, o.use_date, \
     o.quantity, o.total_price, o.status, o.refund_reason, o.refund_amount, \
     o.refund_apply_at, o.refund_audit_at, o.created_at";

const LISTING_JOINS: &str = "FROM orders o
             JOIN users u ON u.id = o.user_id
             JOIN scenic_spots s ON s.id = o.scenic_spot_id
             JOIN ticket_types t ON t.id = o.ticket_type_id";

pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new pending order, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders
                (user_id, scenic_spot_id, ticket_type_id, use_date, quantity,
                 total_price, order_number, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, {pending})
             RETURNING {COLUMNS}",
            pending = OrderStatus::Pending.id()
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(input.scenic_spot_id)
            .bind(input.ticket_type_id)
            .bind(input.use_date)
            .bind(input.quantity)
            .bind(input.total_price)
            .bind(&input.order_number)
            .fetch_one(pool)
            .await
    }

    /// An order, only if it belongs to the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Joined order detail. When `scoped_admin` is set, only matches orders
    /// on spots managed by that scenic admin.
    pub async fn find_listing(
        pool: &PgPool,
        id: DbId,
        scoped_admin: Option<DbId>,
    ) -> Result<Option<OrderListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE o.id = $1
               AND ($2::bigint IS NULL OR s.admin_id = $2)"
        );
        sqlx::query_as::<_, OrderListing>(&query)
            .bind(id)
            .bind(scoped_admin)
            .fetch_optional(pool)
            .await
    }

    /// One user's orders, newest first, optional status filter, paginated.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE o.user_id = $1
               AND ($2::smallint IS NULL OR o.status = $2)
             ORDER BY o.created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, OrderListing>(&query)
            .bind(user_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Order listing for admin screens, newest first.
    ///
    /// `scoped_admin` limits results to spots managed by one scenic admin;
    /// the platform admin passes `None` for the global view. The search term
    /// matches order number, buyer email, or spot name.
    pub async fn list(
        pool: &PgPool,
        filter: &OrderFilter,
        scoped_admin: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE ($1::smallint IS NULL OR o.status = $1)
               AND ($2::text IS NULL
                    OR o.order_number ILIKE '%' || $2 || '%'
                    OR u.email ILIKE '%' || $2 || '%'
                    OR s.name ILIKE '%' || $2 || '%')
               AND ($3::bigint IS NULL OR s.admin_id = $3)
             ORDER BY o.created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, OrderListing>(&query)
            .bind(filter.status)
            .bind(&filter.search)
            .bind(scoped_admin)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Per-status order counts, optionally scoped to one scenic admin.
    pub async fn status_counts(
        pool: &PgPool,
        scoped_admin: Option<DbId>,
    ) -> Result<OrderStatusCounts, sqlx::Error> {
        sqlx::query_as::<_, OrderStatusCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE o.status = 0) AS pending,
                    COUNT(*) FILTER (WHERE o.status = 1) AS paid,
                    COUNT(*) FILTER (WHERE o.status = 2) AS canceled,
                    COUNT(*) FILTER (WHERE o.status = 3) AS used,
                    COUNT(*) FILTER (WHERE o.status = 4) AS refunded,
                    COUNT(*) FILTER (WHERE o.status = 5) AS refund_pending
             FROM orders o
             JOIN scenic_spots s ON s.id = o.scenic_spot_id
             WHERE ($1::bigint IS NULL OR s.admin_id = $1)",
        )
        .bind(scoped_admin)
        .fetch_one(pool)
        .await
    }

    /// Conditionally transition an order: applied only when the current
    /// status is `from`. Returns the updated row, or `None` when the order
    /// was missing or not in the expected status.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        debug_assert!(
            from.can_transition(to),
            "illegal transition {} -> {}",
            from.label(),
            to.label()
        );
        let query = format!(
            "UPDATE orders SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .fetch_optional(pool)
            .await
    }

    /// User-initiated refund request: Paid -> RefundPending, stamping the
    /// apply time and storing the reason. Inventory is untouched until the
    /// admin approves.
    pub async fn apply_refund(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        reason: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = {refund_pending},
                refund_reason = $3,
                refund_apply_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2 AND status = {paid}
             RETURNING {COLUMNS}",
            refund_pending = OrderStatus::RefundPending.id(),
            paid = OrderStatus::Paid.id()
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Admin approval: RefundPending -> Refunded, stamping the audit time and
    /// recording the refunded amount. The conditional status guard makes this
    /// single-shot; a second approval matches nothing.
    pub async fn approve_refund(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = {refunded},
                refund_amount = total_price,
                refund_audit_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND status = {refund_pending}
             RETURNING {COLUMNS}",
            refunded = OrderStatus::Refunded.id(),
            refund_pending = OrderStatus::RefundPending.id()
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin rejection: RefundPending -> Paid, stamping the audit time.
    /// No inventory change.
    pub async fn reject_refund(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = {paid},
                refund_audit_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND status = {refund_pending}
             RETURNING {COLUMNS}",
            paid = OrderStatus::Paid.id(),
            refund_pending = OrderStatus::RefundPending.id()
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of orders created today (UTC), optionally scoped to one
    /// scenic admin's spots.
    pub async fn today_count(
        pool: &PgPool,
        scoped_admin: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders o
             JOIN scenic_spots s ON s.id = o.scenic_spot_id
             WHERE o.created_at >= date_trunc('day', NOW())
               AND ($1::bigint IS NULL OR s.admin_id = $1)",
        )
        .bind(scoped_admin)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Sum of paid order totals, optionally scoped to one scenic admin.
    pub async fn total_paid_sales(
        pool: &PgPool,
        scoped_admin: Option<DbId>,
    ) -> Result<Decimal, sqlx::Error> {
        let (total,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(o.total_price), 0) FROM orders o
             JOIN scenic_spots s ON s.id = o.scenic_spot_id
             WHERE o.status = 1
               AND ($1::bigint IS NULL OR s.admin_id = $1)",
        )
        .bind(scoped_admin)
        .fetch_one(pool)
        .await?;
        Ok(total)
    }

    /// The most recent orders for dashboard widgets.
    pub async fn recent(
        pool: &PgPool,
        scoped_admin: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<OrderListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE ($1::bigint IS NULL OR s.admin_id = $1)
             ORDER BY o.created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, OrderListing>(&query)
            .bind(scoped_admin)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Hard-delete an order (platform admin only). Returns `true` if removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
