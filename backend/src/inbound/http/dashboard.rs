//! Dashboard handlers.
//!
//! ```text
//! GET /api/student/dashboard/{bagNo}
//! GET /api/washerman/dashboard
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{StudentDashboard, WashermanDashboard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::bag_number_path;

/// Profile, order counters and the five most recent orders of a student.
#[utoipa::path(
    get,
    path = "/api/student/dashboard/{bagNo}",
    params(("bagNo" = String, Path, description = "Student bag number", example = "B-12")),
    responses(
        (status = 200, description = "Student dashboard", body = ApiResponse<StudentDashboard>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 404, description = "Student not found", body = ErrorEnvelope)
    ),
    tags = ["dashboard"],
    operation_id = "getStudentDashboard"
)]
#[get("/student/dashboard/{bag_no}")]
pub async fn student_dashboard(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let bag_no = bag_number_path(&path.into_inner())?;
    let dashboard = state.dashboards.student_dashboard(&bag_no).await?;
    Ok(ApiResponse::data(dashboard).ok())
}

/// Counters over every order and the ten most recent orders.
#[utoipa::path(
    get,
    path = "/api/washerman/dashboard",
    responses(
        (status = 200, description = "Washerman dashboard", body = ApiResponse<WashermanDashboard>),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["dashboard"],
    operation_id = "getWashermanDashboard"
)]
#[get("/washerman/dashboard")]
pub async fn washerman_dashboard(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let dashboard = state.dashboards.washerman_dashboard().await?;
    Ok(ApiResponse::data(dashboard).ok())
}
