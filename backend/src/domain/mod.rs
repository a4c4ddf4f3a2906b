//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed laundry entities and the use-cases that
//! operate on them. Types validate on construction; services depend only on
//! ports so adapters stay replaceable.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - Order, OrderStatus, ClothesCount: the order lifecycle.
//! - StudentProfile, BagNumber, EmailAddress: student accounts.
//! - WashermanProfile, Username: operator accounts.
//! - OrderService, StudentService, WashermanService, DashboardService.

pub mod auth;
pub mod dashboard;
pub mod dashboard_service;
pub mod error;
pub mod order;
pub mod order_service;
mod port_error_mapping;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod text;
pub mod trace_id;
pub mod washerman;
pub mod washerman_service;

pub use self::auth::{
    CredentialValidationError, LoginCredentials, PASSWORD_MIN_LEN, Password, PasswordHash,
};
pub use self::dashboard::{
    OrderCounts, STUDENT_RECENT_ORDERS, StudentDashboard, WASHERMAN_RECENT_ORDERS,
    WashermanDashboard,
};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, FieldError};
pub use self::order::{
    ClothesCount, MAX_CLOTHES, MIN_CLOTHES, NewOrder, Order, OrderId, OrderStatus,
    OrderValidationError, StudentOrder,
};
pub use self::order_service::OrderService;
pub use self::student::{
    BagNumber, DEFAULT_EMAIL_DOMAIN, EmailAddress, EmailPolicy, Student, StudentChanges,
    StudentConflict, StudentPatch, StudentProfile, StudentRegistration, StudentSignup,
    StudentUniqueKeys, StudentUpdate, StudentValidationError, normalise_email,
};
pub use self::student_service::StudentService;
pub use self::text::collapse_whitespace;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::washerman::{
    Username, Washerman, WashermanChanges, WashermanId, WashermanPatch, WashermanProfile,
    WashermanRegistration, WashermanValidationError,
};
pub use self::washerman_service::WashermanService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use laundry_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Order not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
