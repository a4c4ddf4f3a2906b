//! Driving port for student account use-cases.

use async_trait::async_trait;

use crate::domain::{BagNumber, Error, LoginCredentials, StudentProfile, StudentSignup, StudentUpdate};

/// Signup, login and administration of student accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAccounts: Send + Sync {
    /// Validate, check uniqueness, hash the password and store a student.
    async fn sign_up(&self, signup: StudentSignup) -> Result<StudentProfile, Error>;

    /// Authenticate by email. Any mismatch yields the same unauthorised error.
    async fn log_in(&self, credentials: LoginCredentials) -> Result<StudentProfile, Error>;

    async fn list_students(&self) -> Result<Vec<StudentProfile>, Error>;

    async fn update_student(
        &self,
        bag_no: &BagNumber,
        update: StudentUpdate,
    ) -> Result<StudentProfile, Error>;

    /// Remove the student together with their orders.
    async fn delete_student(&self, bag_no: &BagNumber) -> Result<(), Error>;
}
