//! Order lifecycle: status enum, transition rules, and order numbers.
//!
//! Status discriminants are stored directly in `orders.status` (SMALLINT)
//! and must never be renumbered.

use rand::Rng;

/// Status column type matching SMALLINT in the database.
pub type StatusId = i16;

/// Lifecycle state of a ticket order.
///
/// ```text
/// Pending ──pay──> Paid ──redeem──> Used
///    │               │
///  cancel       apply refund
///    │               │
///    v               v
/// Canceled     RefundPending ──approve──> Refunded
///                    │
///                 reject
///                    v
///                  Paid
/// ```
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending = 0,
    Paid = 1,
    Canceled = 2,
    Used = 3,
    Refunded = 4,
    RefundPending = 5,
}

impl OrderStatus {
    /// Return the database status discriminant.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Decode a database discriminant.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            0 => Some(Self::Pending),
            1 => Some(Self::Paid),
            2 => Some(Self::Canceled),
            3 => Some(Self::Used),
            4 => Some(Self::Refunded),
            5 => Some(Self::RefundPending),
            _ => None,
        }
    }

    /// Human-readable status label used in API responses.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
            Self::Used => "used",
            Self::Refunded => "refunded",
            Self::RefundPending => "refund_pending",
        }
    }

    /// Whether the `self -> to` transition is allowed.
    ///
    /// Canceled, Used, and Refunded are terminal. A rejected refund returns
    /// the order to Paid.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Paid)
                | (Self::Pending, Self::Canceled)
                | (Self::Paid, Self::RefundPending)
                | (Self::Paid, Self::Used)
                | (Self::RefundPending, Self::Refunded)
                | (Self::RefundPending, Self::Paid)
        )
    }
}

impl From<OrderStatus> for StatusId {
    fn from(value: OrderStatus) -> Self {
        value as StatusId
    }
}

/// Generate an order number: `yyyyMMddHHmmss` plus a 6-digit random suffix.
///
/// Collisions are theoretically possible within one second; the unique
/// constraint on `orders.order_number` is the backstop.
pub fn generate_order_number() -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u32 = rand::rng().random_range(0..1_000_000);
    format!("{stamp}{suffix:06}")
}
