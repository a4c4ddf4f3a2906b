//! Port for order persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    BagNumber, ClothesCount, NewOrder, Order, OrderCounts, OrderId, OrderStatus, StudentOrder,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
    }
}

/// Narrows order listings. Results are always newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub bag_no: Option<BagNumber>,
    pub status: Option<OrderStatus>,
    pub limit: Option<usize>,
}

impl OrderFilter {
    /// Orders placed by one student.
    pub fn for_student(bag_no: BagNumber) -> Self {
        Self {
            bag_no: Some(bag_no),
            ..Self::default()
        }
    }

    /// Orders currently in `status`.
    pub fn with_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order and return the stored record.
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError>;

    /// Look up one order by identifier.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError>;

    /// Compare-and-set status update: writes `to` only while the stored
    /// status still equals `from`. `None` when no row matched, either because
    /// the order is gone or because its status moved on.
    async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Single-record count update. `None` when the order does not exist.
    async fn update_count(
        &self,
        id: OrderId,
        count: ClothesCount,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Orders joined with their student's name, newest first.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<StudentOrder>, OrderRepositoryError>;

    /// Per-status totals, across every order or one student's orders.
    async fn count_by_status(
        &self,
        bag_no: Option<BagNumber>,
    ) -> Result<OrderCounts, OrderRepositoryError>;
}
