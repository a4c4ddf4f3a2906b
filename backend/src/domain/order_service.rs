//! Order lifecycle and order read services.
//!
//! The service owns the status state machine: it loads the current order,
//! checks the transition and persists the new status with a compare-and-set
//! on the status it read, so a stale read can never move an order backwards.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::port_error_mapping::{map_order_repository_error, map_student_repository_error};
use crate::domain::ports::{
    CreateOrderRequest, OrderFilter, OrderLifecycle, OrderQuery, OrderRepository,
    StudentRepository, UpdateOrderCountRequest, UpdateOrderStatusRequest,
};
use crate::domain::{
    BagNumber, ClothesCount, Error, NewOrder, Order, OrderId, OrderStatus, OrderValidationError,
    StudentOrder,
};

const STUDENT_FOR_BAG_NOT_FOUND: &str = "Student with this bag number not found";
const STUDENT_NOT_FOUND: &str = "Student not found";
const ORDER_NOT_FOUND: &str = "Order not found";

fn map_validation_error(error: OrderValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Domain service implementing [`OrderLifecycle`] and [`OrderQuery`].
#[derive(Clone)]
pub struct OrderService<S, O> {
    students: Arc<S>,
    orders: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<S, O> OrderService<S, O> {
    /// Create a service over the given repositories and clock.
    pub fn new(students: Arc<S>, orders: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        Self {
            students,
            orders,
            clock,
        }
    }
}

impl<S, O> OrderService<S, O>
where
    S: StudentRepository,
    O: OrderRepository,
{
    async fn require_student(&self, bag_no: &BagNumber, message: &str) -> Result<(), Error> {
        let exists = self
            .students
            .exists(bag_no)
            .await
            .map_err(map_student_repository_error)?;
        if exists {
            Ok(())
        } else {
            Err(Error::not_found(message))
        }
    }

    /// Explains a compare-and-set miss: the order vanished, or another
    /// update moved it off `from` first.
    async fn lost_status_race(&self, id: OrderId, from: OrderStatus, to: OrderStatus) -> Error {
        match self.orders.find_by_id(id).await {
            Ok(Some(order)) => {
                info!(order_id = %id, expected = %from, found = %order.status, "stale status update rejected");
                map_validation_error(OrderValidationError::IllegalTransition {
                    from: order.status,
                    to,
                })
            }
            Ok(None) => Error::not_found(ORDER_NOT_FOUND),
            Err(error) => map_order_repository_error(error),
        }
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<StudentOrder>, Error> {
        self.orders
            .list(&filter)
            .await
            .map_err(map_order_repository_error)
    }
}

#[async_trait]
impl<S, O> OrderLifecycle for OrderService<S, O>
where
    S: StudentRepository,
    O: OrderRepository,
{
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, Error> {
        // A malformed bag number cannot belong to any student.
        let bag_no = BagNumber::parse(&request.bag_no)
            .map_err(|_| Error::not_found(STUDENT_FOR_BAG_NOT_FOUND))?;
        self.require_student(&bag_no, STUDENT_FOR_BAG_NOT_FOUND)
            .await?;
        let count = ClothesCount::new(request.number_of_clothes).map_err(map_validation_error)?;

        let order = self
            .orders
            .insert(&NewOrder::pending(bag_no, count, self.clock.utc()))
            .await
            .map_err(map_order_repository_error)?;
        info!(order_id = %order.id, bag_no = %order.bag_no, "order created");
        Ok(order)
    }

    async fn update_status(&self, request: UpdateOrderStatusRequest) -> Result<Order, Error> {
        let requested =
            OrderStatus::parse_requested(&request.status).map_err(map_validation_error)?;
        let current = self
            .orders
            .find_by_id(request.order_id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found(ORDER_NOT_FOUND))?;
        let next = current
            .status
            .transition_to(requested)
            .map_err(map_validation_error)?;

        let Some(updated) = self
            .orders
            .update_status(request.order_id, current.status, next, self.clock.utc())
            .await
            .map_err(map_order_repository_error)?
        else {
            return Err(self.lost_status_race(request.order_id, current.status, next).await);
        };
        info!(order_id = %updated.id, from = %current.status, to = %next, "order status updated");
        Ok(updated)
    }

    async fn update_count(&self, request: UpdateOrderCountRequest) -> Result<Order, Error> {
        let count = ClothesCount::new(request.number_of_clothes).map_err(map_validation_error)?;
        let updated = self
            .orders
            .update_count(request.order_id, count, self.clock.utc())
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found(ORDER_NOT_FOUND))?;
        info!(order_id = %updated.id, count = count.get(), "order count updated");
        Ok(updated)
    }
}

#[async_trait]
impl<S, O> OrderQuery for OrderService<S, O>
where
    S: StudentRepository,
    O: OrderRepository,
{
    async fn student_orders(&self, bag_no: &BagNumber) -> Result<Vec<StudentOrder>, Error> {
        self.require_student(bag_no, STUDENT_NOT_FOUND).await?;
        self.list(OrderFilter::for_student(bag_no.clone())).await
    }

    async fn all_orders(&self) -> Result<Vec<StudentOrder>, Error> {
        self.list(OrderFilter::default()).await
    }

    async fn pending_orders(&self) -> Result<Vec<StudentOrder>, Error> {
        self.list(OrderFilter::with_status(OrderStatus::Pending))
            .await
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Order, Error> {
        self.orders
            .find_by_id(id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found(ORDER_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
