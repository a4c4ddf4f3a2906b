//! Port for student persistence.

use async_trait::async_trait;

use crate::domain::{BagNumber, Student, StudentPatch, StudentProfile, StudentUniqueKeys};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Whether a student owns `bag_no`, answered by a row count.
    async fn exists(&self, bag_no: &BagNumber) -> Result<bool, StudentRepositoryError>;

    async fn find_by_bag_no(
        &self,
        bag_no: &BagNumber,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Lookup by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError>;

    /// Every student matching at least one of the provided keys.
    async fn find_conflicts(
        &self,
        keys: &StudentUniqueKeys,
    ) -> Result<Vec<StudentProfile>, StudentRepositoryError>;

    async fn insert(&self, student: &Student) -> Result<StudentProfile, StudentRepositoryError>;

    /// All students, newest first.
    async fn list(&self) -> Result<Vec<StudentProfile>, StudentRepositoryError>;

    /// Apply a partial update. `None` when the student does not exist.
    async fn update(
        &self,
        bag_no: &BagNumber,
        patch: &StudentPatch,
    ) -> Result<Option<StudentProfile>, StudentRepositoryError>;

    /// Remove a student and all of their orders as one unit of work.
    ///
    /// Returns `false` when no such student exists.
    async fn delete_with_orders(&self, bag_no: &BagNumber) -> Result<bool, StudentRepositoryError>;
}
