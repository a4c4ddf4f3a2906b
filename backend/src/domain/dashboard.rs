//! Read-side dashboard aggregates.

use serde::Serialize;
use utoipa::ToSchema;

use super::order::{Order, OrderStatus};
use super::student::StudentProfile;

/// Number of recent orders shown on a student dashboard.
pub const STUDENT_RECENT_ORDERS: usize = 5;
/// Number of recent orders shown on the washerman dashboard.
pub const WASHERMAN_RECENT_ORDERS: usize = 10;

/// Order totals broken down by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCounts {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub inprogress_orders: u64,
    pub complete_orders: u64,
}

impl OrderCounts {
    /// Tally a set of orders.
    ///
    /// # Examples
    /// ```
    /// use laundry_backend::domain::{OrderCounts, OrderStatus};
    ///
    /// let counts = OrderCounts::tally([OrderStatus::Pending, OrderStatus::Complete]);
    /// assert_eq!(counts.total_orders, 2);
    /// assert_eq!(counts.pending_orders, 1);
    /// ```
    pub fn tally(statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            acc.total_orders += 1;
            match status {
                OrderStatus::Pending => acc.pending_orders += 1,
                OrderStatus::InProgress => acc.inprogress_orders += 1,
                OrderStatus::Complete => acc.complete_orders += 1,
            }
            acc
        })
    }
}

/// Dashboard for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub student: StudentProfile,
    #[serde(flatten)]
    pub counts: OrderCounts,
    pub recent_orders: Vec<Order>,
}

/// Dashboard across all orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WashermanDashboard {
    #[serde(flatten)]
    pub counts: OrderCounts,
    pub recent_orders: Vec<Order>,
}
