//! Driving port for order reads.

use async_trait::async_trait;

use crate::domain::{BagNumber, Error, Order, OrderId, StudentOrder};

/// Read-side order use-cases. Listings are newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Orders of one student; not found when the student does not exist.
    async fn student_orders(&self, bag_no: &BagNumber) -> Result<Vec<StudentOrder>, Error>;

    async fn all_orders(&self) -> Result<Vec<StudentOrder>, Error>;

    async fn pending_orders(&self) -> Result<Vec<StudentOrder>, Error>;

    async fn order_by_id(&self, id: OrderId) -> Result<Order, Error>;
}
