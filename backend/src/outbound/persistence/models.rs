//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{orders, students, washermen};

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub bag_no: String,
    pub name: String,
    pub email: String,
    pub enrollment_no: String,
    pub phone_no: String,
    pub residency_no: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub bag_no: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub enrollment_no: &'a str,
    pub phone_no: &'a str,
    pub residency_no: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub enrollment_no: Option<&'a str>,
    pub phone_no: Option<&'a str>,
    pub residency_no: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Washermen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = washermen)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WashermanRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = washermen)]
pub(crate) struct NewWashermanRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = washermen)]
pub(crate) struct WashermanChangeset<'a> {
    pub username: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i32,
    pub bag_no: String,
    pub number_of_clothes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub bag_no: &'a str,
    pub number_of_clothes: i32,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
