//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and validated
//! domain records; no business rules live here. Connections come from a
//! `bb8` pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use laundry_backend::outbound::persistence::{DbPool, DieselOrderRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/laundry")).await?;
//! let orders = DieselOrderRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_order_repository;
mod diesel_student_repository;
mod diesel_washerman_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_washerman_repository::DieselWashermanRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
