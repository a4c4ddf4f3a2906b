//! Conversions from driven-port errors into domain errors.
//!
//! Connection failures become `ServiceUnavailable`; everything else is an
//! internal error whose details stay in the logs.

use crate::domain::Error;
use crate::domain::ports::{
    OrderRepositoryError, PasswordHasherError, StudentRepositoryError, WashermanRepositoryError,
};

pub(crate) fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
    }
}

pub(crate) fn map_student_repository_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
    }
}

pub(crate) fn map_washerman_repository_error(error: WashermanRepositoryError) -> Error {
    match error {
        WashermanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("washerman repository unavailable: {message}"))
        }
        WashermanRepositoryError::Query { message } => {
            Error::internal(format!("washerman repository error: {message}"))
        }
    }
}

pub(crate) fn map_password_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}
