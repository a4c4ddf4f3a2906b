//! Administrative account management handlers.
//!
//! ```text
//! GET    /api/admin/students
//! PUT    /api/admin/students/{bagNo}
//! DELETE /api/admin/students/{bagNo}
//! GET    /api/admin/washermen
//! PUT    /api/admin/washermen/{id}
//! DELETE /api/admin/washermen/{id}
//! ```
//!
//! Partial updates: omitted or empty fields are left unchanged.

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::WashermanUpdate;
use crate::domain::{StudentProfile, StudentUpdate, WashermanProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{bag_number_path, washerman_id_path};

/// `PUT /admin/students/{bagNo}` body. The bag number itself cannot change.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentUpdateBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub enrollment_no: Option<String>,
    pub phone_no: Option<String>,
    pub residency_no: Option<String>,
    pub password: Option<String>,
}

impl From<StudentUpdateBody> for StudentUpdate {
    fn from(value: StudentUpdateBody) -> Self {
        Self {
            name: value.name,
            email: value.email,
            enrollment_no: value.enrollment_no,
            phone_no: value.phone_no,
            residency_no: value.residency_no,
            password: value.password,
        }
    }
}

/// `PUT /admin/washermen/{id}` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct WashermanUpdateBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/admin/students",
    responses(
        (status = 200, description = "Students retrieved", body = ApiResponse<Vec<StudentProfile>>),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "getAllStudents"
)]
#[get("/admin/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let students = state.students.list_students().await?;
    Ok(ApiResponse::with_message("Students retrieved successfully", students).ok())
}

#[utoipa::path(
    put,
    path = "/api/admin/students/{bagNo}",
    params(("bagNo" = String, Path, description = "Student bag number", example = "B-12")),
    request_body = StudentUpdateBody,
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<StudentProfile>),
        (status = 400, description = "Invalid field value", body = ErrorEnvelope),
        (status = 404, description = "Student not found", body = ErrorEnvelope),
        (status = 409, description = "Email or enrollment number taken", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "updateStudent"
)]
#[put("/admin/students/{bag_no}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StudentUpdateBody>,
) -> ApiResult<HttpResponse> {
    let bag_no = bag_number_path(&path.into_inner())?;
    let student = state
        .students
        .update_student(&bag_no, payload.into_inner().into())
        .await?;
    Ok(ApiResponse::with_message("Student updated successfully", student).ok())
}

/// Delete a student together with all of their orders.
#[utoipa::path(
    delete,
    path = "/api/admin/students/{bagNo}",
    params(("bagNo" = String, Path, description = "Student bag number", example = "B-12")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "deleteStudent"
)]
#[delete("/admin/students/{bag_no}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let bag_no = bag_number_path(&path.into_inner())?;
    state.students.delete_student(&bag_no).await?;
    Ok(ApiResponse::message("Student deleted successfully").ok())
}

#[utoipa::path(
    get,
    path = "/api/admin/washermen",
    responses(
        (status = 200, description = "Washermen retrieved", body = ApiResponse<Vec<WashermanProfile>>),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "getAllWashermen"
)]
#[get("/admin/washermen")]
pub async fn list_washermen(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let washermen = state.washermen.list_washermen().await?;
    Ok(ApiResponse::with_message("Washermen retrieved successfully", washermen).ok())
}

#[utoipa::path(
    put,
    path = "/api/admin/washermen/{id}",
    params(("id" = i32, Path, description = "Washerman identifier")),
    request_body = WashermanUpdateBody,
    responses(
        (status = 200, description = "Washerman updated", body = ApiResponse<WashermanProfile>),
        (status = 400, description = "Invalid field value", body = ErrorEnvelope),
        (status = 404, description = "Washerman not found", body = ErrorEnvelope),
        (status = 409, description = "Username already exists", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "updateWasherman"
)]
#[put("/admin/washermen/{id}")]
pub async fn update_washerman(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<WashermanUpdateBody>,
) -> ApiResult<HttpResponse> {
    let id = washerman_id_path(&path.into_inner())?;
    let WashermanUpdateBody { username, password } = payload.into_inner();
    let washerman = state
        .washermen
        .update_washerman(id, WashermanUpdate { username, password })
        .await?;
    Ok(ApiResponse::with_message("Washerman updated successfully", washerman).ok())
}

#[utoipa::path(
    delete,
    path = "/api/admin/washermen/{id}",
    params(("id" = i32, Path, description = "Washerman identifier")),
    responses(
        (status = 200, description = "Washerman deleted"),
        (status = 404, description = "Washerman not found", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "deleteWasherman"
)]
#[delete("/admin/washermen/{id}")]
pub async fn delete_washerman(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = washerman_id_path(&path.into_inner())?;
    state.washermen.delete_washerman(id).await?;
    Ok(ApiResponse::message("Washerman deleted successfully").ok())
}
