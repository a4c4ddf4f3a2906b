//! Student account service: signup, login and administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::port_error_mapping::{map_password_hasher_error, map_student_repository_error};
use crate::domain::ports::{PasswordHasher, StudentAccounts, StudentRepository};
use crate::domain::{
    BagNumber, EmailPolicy, Error, LoginCredentials, Student, StudentPatch, StudentProfile,
    StudentSignup, StudentUniqueKeys, StudentUpdate, StudentValidationError, normalise_email,
};

const STUDENT_NOT_FOUND: &str = "Student not found";
const INVALID_LOGIN: &str = "Invalid email or password";

fn map_validation_error(error: StudentValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Domain service implementing [`StudentAccounts`].
#[derive(Clone)]
pub struct StudentService<R, H> {
    students: Arc<R>,
    hasher: Arc<H>,
    policy: EmailPolicy,
    clock: Arc<dyn Clock>,
}

impl<R, H> StudentService<R, H> {
    /// Create a service over the student store, hasher, email policy and clock.
    pub fn new(students: Arc<R>, hasher: Arc<H>, policy: EmailPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            students,
            hasher,
            policy,
            clock,
        }
    }
}

impl<R, H> StudentService<R, H>
where
    R: StudentRepository,
    H: PasswordHasher,
{
    /// Fail with a conflict if any key is already held by a student other
    /// than `owner`.
    async fn ensure_unique(
        &self,
        keys: &StudentUniqueKeys,
        owner: Option<&BagNumber>,
    ) -> Result<(), Error> {
        if keys == &StudentUniqueKeys::default() {
            return Ok(());
        }
        let mut existing = self
            .students
            .find_conflicts(keys)
            .await
            .map_err(map_student_repository_error)?;
        if let Some(owner) = owner {
            existing.retain(|student| &student.bag_no != owner);
        }
        match keys.first_conflict(&existing) {
            Some(conflict) => Err(Error::conflict(conflict.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R, H> StudentAccounts for StudentService<R, H>
where
    R: StudentRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, signup: StudentSignup) -> Result<StudentProfile, Error> {
        let registration = signup.validate(&self.policy).map_err(map_validation_error)?;
        self.ensure_unique(
            &StudentUniqueKeys {
                email: Some(registration.email.clone()),
                enrollment_no: Some(registration.enrollment_no.clone()),
                bag_no: Some(registration.bag_no.clone()),
            },
            None,
        )
        .await?;

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(map_password_hasher_error)?;
        let now = self.clock.utc();
        let student = Student {
            profile: StudentProfile {
                bag_no: registration.bag_no,
                name: registration.name,
                email: registration.email,
                enrollment_no: registration.enrollment_no,
                phone_no: registration.phone_no,
                residency_no: registration.residency_no,
                created_at: now,
                updated_at: now,
            },
            password_hash,
        };

        let profile = self
            .students
            .insert(&student)
            .await
            .map_err(map_student_repository_error)?;
        info!(bag_no = %profile.bag_no, "student registered");
        Ok(profile)
    }

    async fn log_in(&self, credentials: LoginCredentials) -> Result<StudentProfile, Error> {
        let email = normalise_email(credentials.identifier());
        let student = self
            .students
            .find_by_email(&email)
            .await
            .map_err(map_student_repository_error)?;

        match student {
            Some(student) if self.hasher.verify(credentials.password(), &student.password_hash) => {
                Ok(student.profile)
            }
            _ => {
                warn!("student login rejected");
                Err(Error::unauthorized(INVALID_LOGIN))
            }
        }
    }

    async fn list_students(&self) -> Result<Vec<StudentProfile>, Error> {
        self.students
            .list()
            .await
            .map_err(map_student_repository_error)
    }

    async fn update_student(
        &self,
        bag_no: &BagNumber,
        update: StudentUpdate,
    ) -> Result<StudentProfile, Error> {
        let existing = self
            .students
            .find_by_bag_no(bag_no)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))?;
        let changes = update.validate(&self.policy).map_err(map_validation_error)?;

        self.ensure_unique(
            &StudentUniqueKeys {
                email: changes
                    .email
                    .clone()
                    .filter(|email| email != &existing.profile.email),
                enrollment_no: changes
                    .enrollment_no
                    .clone()
                    .filter(|no| no != &existing.profile.enrollment_no),
                bag_no: None,
            },
            Some(bag_no),
        )
        .await?;

        let password_hash = changes
            .password
            .as_ref()
            .map(|password| self.hasher.hash(password))
            .transpose()
            .map_err(map_password_hasher_error)?;
        let patch = StudentPatch {
            name: changes.name,
            email: changes.email,
            enrollment_no: changes.enrollment_no,
            phone_no: changes.phone_no,
            residency_no: changes.residency_no,
            password_hash,
            updated_at: self.clock.utc(),
        };

        let profile = self
            .students
            .update(bag_no, &patch)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))?;
        info!(bag_no = %profile.bag_no, "student updated");
        Ok(profile)
    }

    async fn delete_student(&self, bag_no: &BagNumber) -> Result<(), Error> {
        let removed = self
            .students
            .delete_with_orders(bag_no)
            .await
            .map_err(map_student_repository_error)?;
        if !removed {
            return Err(Error::not_found(STUDENT_NOT_FOUND));
        }
        info!(bag_no = %bag_no, "student and orders deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
