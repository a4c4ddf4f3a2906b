//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_query;
mod order_lifecycle;
mod order_query;
mod order_repository;
mod password_hasher;
mod student_accounts;
mod student_repository;
mod washerman_accounts;
mod washerman_repository;

#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use order_lifecycle::MockOrderLifecycle;
pub use order_lifecycle::{
    CreateOrderRequest, OrderLifecycle, UpdateOrderCountRequest, UpdateOrderStatusRequest,
};
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::OrderQuery;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderFilter, OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use student_accounts::MockStudentAccounts;
pub use student_accounts::StudentAccounts;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
#[cfg(test)]
pub use washerman_accounts::MockWashermanAccounts;
pub use washerman_accounts::{WashermanAccounts, WashermanSignup, WashermanUpdate};
#[cfg(test)]
pub use washerman_repository::MockWashermanRepository;
pub use washerman_repository::{NewWasherman, WashermanRepository, WashermanRepositoryError};
