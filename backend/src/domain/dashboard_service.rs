//! Dashboard aggregation over the order and student repositories.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::port_error_mapping::{map_order_repository_error, map_student_repository_error};
use crate::domain::ports::{DashboardQuery, OrderFilter, OrderRepository, StudentRepository};
use crate::domain::{
    BagNumber, Error, Order, STUDENT_RECENT_ORDERS, StudentDashboard, WASHERMAN_RECENT_ORDERS,
    WashermanDashboard,
};

/// Domain service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<S, O> {
    students: Arc<S>,
    orders: Arc<O>,
}

impl<S, O> DashboardService<S, O> {
    /// Create a service reading from the given repositories.
    pub fn new(students: Arc<S>, orders: Arc<O>) -> Self {
        Self { students, orders }
    }
}

impl<S, O> DashboardService<S, O>
where
    O: OrderRepository,
{
    async fn recent(&self, filter: OrderFilter) -> Result<Vec<Order>, Error> {
        let listed = self
            .orders
            .list(&filter)
            .await
            .map_err(map_order_repository_error)?;
        Ok(listed.into_iter().map(|entry| entry.order).collect())
    }
}

#[async_trait]
impl<S, O> DashboardQuery for DashboardService<S, O>
where
    S: StudentRepository,
    O: OrderRepository,
{
    async fn student_dashboard(&self, bag_no: &BagNumber) -> Result<StudentDashboard, Error> {
        let student = self
            .students
            .find_by_bag_no(bag_no)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| Error::not_found("Student not found"))?;
        let counts = self
            .orders
            .count_by_status(Some(bag_no.clone()))
            .await
            .map_err(map_order_repository_error)?;
        let recent_orders = self
            .recent(OrderFilter::for_student(bag_no.clone()).limited(STUDENT_RECENT_ORDERS))
            .await?;

        Ok(StudentDashboard {
            student: student.profile,
            counts,
            recent_orders,
        })
    }

    async fn washerman_dashboard(&self) -> Result<WashermanDashboard, Error> {
        let counts = self
            .orders
            .count_by_status(None)
            .await
            .map_err(map_order_repository_error)?;
        let recent_orders = self
            .recent(OrderFilter::default().limited(WASHERMAN_RECENT_ORDERS))
            .await?;

        Ok(WashermanDashboard {
            counts,
            recent_orders,
        })
    }
}
