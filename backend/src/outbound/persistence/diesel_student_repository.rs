//! PostgreSQL-backed `StudentRepository`.
//!
//! Student deletion removes the student's orders in the same transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{
    BagNumber, EmailAddress, PasswordHash, Student, StudentPatch, StudentProfile,
    StudentUniqueKeys,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{orders, students};

/// Diesel implementation of the student repository port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    map_basic_pool_error(error, StudentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StudentRepositoryError {
    map_basic_diesel_error(
        error,
        StudentRepositoryError::query,
        StudentRepositoryError::connection,
    )
}

fn row_to_profile(row: StudentRow) -> Result<StudentProfile, StudentRepositoryError> {
    row_to_student(row).map(|student| student.profile)
}

/// Rebuild a validated student from a stored row.
fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    let StudentRow {
        bag_no,
        name,
        email,
        enrollment_no,
        phone_no,
        residency_no,
        password_hash,
        created_at,
        updated_at,
    } = row;

    let bag_no = BagNumber::parse(&bag_no)
        .map_err(|err| StudentRepositoryError::query(format!("stored bag number: {err}")))?;
    let email = EmailAddress::parse_shape(&email)
        .map_err(|err| StudentRepositoryError::query(format!("stored email: {err}")))?;

    Ok(Student {
        profile: StudentProfile {
            bag_no,
            name,
            email,
            enrollment_no,
            phone_no,
            residency_no,
            created_at,
            updated_at,
        },
        password_hash: PasswordHash::new(password_hash),
    })
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn exists(&self, bag_no: &BagNumber) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = students::table
            .filter(students::bag_no.eq(bag_no.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count > 0)
    }

    async fn find_by_bag_no(
        &self,
        bag_no: &BagNumber,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = students::table
            .find(bag_no.as_str())
            .select(StudentRow::as_select())
            .first::<StudentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_student).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = students::table
            .filter(students::email.eq(email))
            .select(StudentRow::as_select())
            .first::<StudentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_student).transpose()
    }

    async fn find_conflicts(
        &self,
        keys: &StudentUniqueKeys,
    ) -> Result<Vec<StudentProfile>, StudentRepositoryError> {
        if keys == &StudentUniqueKeys::default() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = students::table
            .select(StudentRow::as_select())
            .into_boxed();
        if let Some(email) = &keys.email {
            query = query.or_filter(students::email.eq(email.as_str()));
        }
        if let Some(enrollment_no) = &keys.enrollment_no {
            query = query.or_filter(students::enrollment_no.eq(enrollment_no.as_str()));
        }
        if let Some(bag_no) = &keys.bag_no {
            query = query.or_filter(students::bag_no.eq(bag_no.as_str()));
        }

        let rows: Vec<StudentRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_profile).collect()
    }

    async fn insert(&self, student: &Student) -> Result<StudentProfile, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let profile = &student.profile;
        let new_row = NewStudentRow {
            bag_no: profile.bag_no.as_str(),
            name: profile.name.as_str(),
            email: profile.email.as_str(),
            enrollment_no: profile.enrollment_no.as_str(),
            phone_no: profile.phone_no.as_str(),
            residency_no: profile.residency_no.as_str(),
            password_hash: student.password_hash.as_str(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };

        let row = diesel::insert_into(students::table)
            .values(&new_row)
            .returning(StudentRow::as_returning())
            .get_result::<StudentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_profile(row)
    }

    async fn list(&self) -> Result<Vec<StudentProfile>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .order((students::created_at.desc(), students::bag_no.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn update(
        &self,
        bag_no: &BagNumber,
        patch: &StudentPatch,
    ) -> Result<Option<StudentProfile>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = StudentChangeset {
            name: patch.name.as_deref(),
            email: patch.email.as_ref().map(EmailAddress::as_str),
            enrollment_no: patch.enrollment_no.as_deref(),
            phone_no: patch.phone_no.as_deref(),
            residency_no: patch.residency_no.as_deref(),
            password_hash: patch.password_hash.as_ref().map(PasswordHash::as_str),
            updated_at: patch.updated_at,
        };

        let row = diesel::update(students::table.find(bag_no.as_str()))
            .set(&changeset)
            .returning(StudentRow::as_returning())
            .get_result::<StudentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn delete_with_orders(&self, bag_no: &BagNumber) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = bag_no.as_str();

        let removed = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(orders::table.filter(orders::bag_no.eq(key)))
                        .execute(conn)
                        .await?;
                    diesel::delete(students::table.find(key))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
