//! Driving port for dashboard aggregates.

use async_trait::async_trait;

use crate::domain::{BagNumber, Error, StudentDashboard, WashermanDashboard};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Profile, per-status totals and the latest orders of one student.
    async fn student_dashboard(&self, bag_no: &BagNumber) -> Result<StudentDashboard, Error>;

    /// Totals and latest orders across every student.
    async fn washerman_dashboard(&self) -> Result<WashermanDashboard, Error>;
}
