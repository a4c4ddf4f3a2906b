//! Driving port for order mutations.

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderId};

/// Request to place an order. Values are raw caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub bag_no: String,
    pub number_of_clothes: i64,
}

/// Request to advance an order's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOrderStatusRequest {
    pub order_id: OrderId,
    pub status: String,
}

/// Request to replace an order's clothes count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOrderCountRequest {
    pub order_id: OrderId,
    pub number_of_clothes: i64,
}

/// Use-cases that create orders and move them through their lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLifecycle: Send + Sync {
    /// Place a pending order for an existing student.
    ///
    /// A missing student is reported as not found before the count is
    /// checked.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, Error>;

    /// Apply one legal status transition.
    async fn update_status(&self, request: UpdateOrderStatusRequest) -> Result<Order, Error>;

    /// Replace the clothes count without touching the status.
    async fn update_count(&self, request: UpdateOrderCountRequest) -> Result<Order, Error>;
}
